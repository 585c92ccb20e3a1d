use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Connection settings for a Moor deployment.
///
/// Credentials and URLs are consumed by the transport implementations the
/// application wires in; the core never dials anything itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoorConfig {
    /// Ledger node websocket URL.
    pub chain_url: String,
    /// Application name announced to the node.
    pub app_name: String,
    pub content: ContentEndpoint,
    pub confidential: ConfidentialEndpoint,
}

impl Default for MoorConfig {
    fn default() -> Self {
        Self {
            chain_url: "ws://127.0.0.1:9944".to_string(),
            app_name: "moor".to_string(),
            content: ContentEndpoint::default(),
            confidential: ConfidentialEndpoint::default(),
        }
    }
}

impl MoorConfig {
    /// Parse a TOML configuration document. Missing fields take their
    /// defaults.
    pub fn from_toml_str(raw: &str) -> SdkResult<Self> {
        toml::from_str(raw).map_err(|e| SdkError::Config(e.to_string()))
    }
}

/// Content-addressed store endpoint and project credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentEndpoint {
    pub url: String,
    pub project_id: Option<String>,
    pub project_secret: Option<String>,
}

impl Default for ContentEndpoint {
    fn default() -> Self {
        Self {
            url: "https://ipfs.infura.io:5001".to_string(),
            project_id: None,
            project_secret: None,
        }
    }
}

/// Confidential-document service endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidentialEndpoint {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local() {
        let config = MoorConfig::default();
        assert_eq!(config.chain_url, "ws://127.0.0.1:9944");
        assert_eq!(config.content.project_id, None);
    }

    #[test]
    fn parses_partial_toml() {
        let config = MoorConfig::from_toml_str(
            r#"
            chain_url = "wss://n1.example.systems"
            app_name = "moor test"

            [content]
            project_id = "2DB4cZf2"
            project_secret = "a21bdbee"
            "#,
        )
        .unwrap();
        assert_eq!(config.chain_url, "wss://n1.example.systems");
        assert_eq!(config.content.project_id.as_deref(), Some("2DB4cZf2"));
        // Unspecified fields keep defaults.
        assert_eq!(config.content.url, "https://ipfs.infura.io:5001");
        assert_eq!(config.confidential.url, "");
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            MoorConfig::from_toml_str("chain_url = ["),
            Err(SdkError::Config(_))
        ));
    }
}
