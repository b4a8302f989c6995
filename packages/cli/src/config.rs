use anyhow::Context;
use folio_content::{Language, LocalDefaults};
use folio_workspace::{DocumentId, SyncConfig, TokenIdentityProvider};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory the file store keeps documents in
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_document")]
    pub document: String,

    /// Replaces the built-in default content when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults_path: Option<String>,

    #[serde(default)]
    pub default_language: Language,

    /// Accounts allowed to sign in for editing
    #[serde(default)]
    pub admins: Vec<AdminConfig>,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminConfig {
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_store_dir() -> String {
    ".folio/store".to_string()
}

fn default_collection() -> String {
    "portfolio".to_string()
}

fn default_document() -> String {
    "main_content".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4040
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            collection: default_collection(),
            document: default_document(),
            defaults_path: None,
            default_language: Language::default(),
            admins: vec![],
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn document_id(&self) -> DocumentId {
        DocumentId::new(&self.collection, &self.document)
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            document: self.document_id(),
            default_language: self.default_language,
        }
    }

    pub fn local_defaults(&self, cwd: &str) -> anyhow::Result<LocalDefaults> {
        match &self.defaults_path {
            Some(path) => {
                let path = PathBuf::from(cwd).join(path);
                LocalDefaults::from_path(&path)
                    .with_context(|| format!("Cannot load default content from {}", path.display()))
            }
            None => Ok(LocalDefaults::embedded()?),
        }
    }

    pub fn identity_provider(&self) -> TokenIdentityProvider {
        TokenIdentityProvider::new(
            self.admins
                .iter()
                .map(|admin| (admin.token.clone(), admin.email.clone())),
        )
    }

    pub fn http_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.http.host, self.http.port);
        addr.parse()
            .with_context(|| format!("Invalid HTTP address: {}", addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "storeDir": "data",
            "collection": "site",
            "defaultLanguage": "zh",
            "admins": [
                { "email": "owner@example.com", "token": "abc" }
            ],
            "http": { "port": 8080 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.store_dir, "data");
        assert_eq!(config.document_id(), DocumentId::new("site", "main_content"));
        assert_eq!(config.default_language, Language::Zh);
        assert_eq!(
            config.admins,
            vec![AdminConfig {
                email: "owner@example.com".to_string(),
                token: "abc".to_string(),
            }]
        );
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.document_id(), DocumentId::default());
        assert_eq!(config.default_language, Language::En);
        assert!(config.admins.is_empty());
        assert!(config.defaults_path.is_none());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config.store_dir, ".folio/store");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(Config::load(dir.path().to_str().unwrap()).is_err());
    }
}
