use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("no collections exist on the ledger")]
    NoCollections,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(#[from] moor_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] moor_ledger::LedgerError),

    #[error("resolver error: {0}")]
    Resolve(#[from] moor_resolver::ResolveError),

    #[error("graph error: {0}")]
    Graph(#[from] moor_graph::GraphError),
}

pub type SdkResult<T> = Result<T, SdkError>;
