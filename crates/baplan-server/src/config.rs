//! Process configuration, read from the environment.
//!
//! | Variable                  | Default                       |
//! |---------------------------|-------------------------------|
//! | `BAPLAN_BIND`             | `0.0.0.0:5000`                |
//! | `BAPLAN_STORE`            | `memory` (or `sqlite`)        |
//! | `BAPLAN_DATABASE_PATH`    | `baplan.db`                   |
//! | `BAPLAN_PROVIDER`         | `openai` (or `bedrock`)       |
//! | `OPENAI_API_KEY`          | required for `openai`         |
//! | `OPENAI_BASE_URL`         | `https://api.openai.com/v1`   |
//! | `BAPLAN_MODEL`            | `gpt-4o`; required for Bedrock |
//! | `BAPLAN_LLM_TIMEOUT_SECS` | `60`                          |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use baplan_llm::openai::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

const DEFAULT_BIND: &str = "0.0.0.0:5000";
const DEFAULT_DATABASE_PATH: &str = "baplan.db";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Memory,
    Sqlite { path: PathBuf },
}

#[derive(Debug, Clone)]
pub enum ProviderConfig {
    OpenAi(OpenAiConfig),
    Bedrock { model_id: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub store: StoreConfig,
    pub provider: ProviderConfig,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BAPLAN_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_raw
            .parse()
            .map_err(|e| eyre::eyre!("BAPLAN_BIND {bind_raw:?} is not a socket address: {e}"))?;

        let store = match get("BAPLAN_STORE").as_deref().unwrap_or("memory") {
            "memory" => StoreConfig::Memory,
            "sqlite" => StoreConfig::Sqlite {
                path: get("BAPLAN_DATABASE_PATH")
                    .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
                    .into(),
            },
            other => {
                return Err(eyre::eyre!(
                    "BAPLAN_STORE must be \"memory\" or \"sqlite\", got {other:?}"
                ));
            }
        };

        let provider = match get("BAPLAN_PROVIDER").as_deref().unwrap_or("openai") {
            "openai" => {
                let api_key = get("OPENAI_API_KEY")
                    .ok_or_else(|| eyre::eyre!("OPENAI_API_KEY is required for the openai provider"))?;
                let timeout_secs = match get("BAPLAN_LLM_TIMEOUT_SECS") {
                    Some(raw) => raw.parse::<u64>().map_err(|e| {
                        eyre::eyre!("BAPLAN_LLM_TIMEOUT_SECS {raw:?} is not a number: {e}")
                    })?,
                    None => DEFAULT_TIMEOUT_SECS,
                };
                ProviderConfig::OpenAi(OpenAiConfig {
                    api_key,
                    base_url: get("OPENAI_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                    model: get("BAPLAN_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            "bedrock" => ProviderConfig::Bedrock {
                model_id: get("BAPLAN_MODEL").ok_or_else(|| {
                    eyre::eyre!("BAPLAN_MODEL must name an inference profile for the bedrock provider")
                })?,
            },
            other => {
                return Err(eyre::eyre!(
                    "BAPLAN_PROVIDER must be \"openai\" or \"bedrock\", got {other:?}"
                ));
            }
        };

        Ok(Self {
            bind,
            store,
            provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> eyre::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_api_key() {
        let config = config(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:5000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.store, StoreConfig::Memory);
        let ProviderConfig::OpenAi(openai) = config.provider else {
            panic!("expected openai provider");
        };
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
        assert_eq!(openai.timeout, Duration::from_secs(60));
    }

    #[test]
    fn openai_requires_api_key() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(config(&[("OPENAI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn sqlite_store_with_custom_path() {
        let config = config(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("BAPLAN_STORE", "sqlite"),
            ("BAPLAN_DATABASE_PATH", "/var/lib/baplan/surveys.db"),
        ])
        .unwrap();
        assert_eq!(
            config.store,
            StoreConfig::Sqlite {
                path: PathBuf::from("/var/lib/baplan/surveys.db")
            }
        );
    }

    #[test]
    fn bedrock_needs_model() {
        assert!(config(&[("BAPLAN_PROVIDER", "bedrock")]).is_err());

        let config = config(&[
            ("BAPLAN_PROVIDER", "bedrock"),
            ("BAPLAN_MODEL", "us.anthropic.claude-sonnet-4-20250514-v1:0"),
        ])
        .unwrap();
        assert!(matches!(config.provider, ProviderConfig::Bedrock { .. }));
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert!(config(&[("OPENAI_API_KEY", "k"), ("BAPLAN_STORE", "postgres")]).is_err());
        assert!(config(&[("BAPLAN_PROVIDER", "gemini")]).is_err());
        assert!(config(&[("OPENAI_API_KEY", "k"), ("BAPLAN_BIND", "localhost")]).is_err());
        assert!(
            config(&[("OPENAI_API_KEY", "k"), ("BAPLAN_LLM_TIMEOUT_SECS", "soon")]).is_err()
        );
    }
}
