use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LedgerConfig {
    pub node: NodeConfig,
    pub policy: PolicyConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NodeConfig {
    pub db_path: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PolicyConfig {
    /// Whether a frozen account may still be credited by transfers.
    /// Sending is always blocked while frozen; receiving is a regulatory
    /// policy choice left to deployment.
    #[serde(default = "default_frozen_receive")]
    pub frozen_accounts_can_receive: bool,
}

fn default_frozen_receive() -> bool {
    false
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig {
                db_path: "./data/ledger".to_string(),
                log_level: "info".to_string(),
            },
            policy: PolicyConfig {
                frozen_accounts_can_receive: false,
            },
        }
    }
}

impl LedgerConfig {
    pub fn load_or_default(path: &str) -> Self {
        if std::path::Path::new(path).exists() {
            match std::fs::read_to_string(path) {
                Ok(s) => match toml::from_str(&s) {
                    Ok(c) => {
                        println!("Config loaded from {}", path);
                        c
                    }
                    Err(e) => {
                        eprintln!("Error parsing config: {}. Using Defaults.", e);
                        Self::default()
                    }
                },
                Err(e) => {
                    eprintln!("Error reading config: {}. Using Defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Config file not found at '{}'. Creating default.", path);
            let config = Self::default();
            if let Ok(s) = toml::to_string_pretty(&config) {
                let _ = std::fs::write(path, s);
            }
            config
        }
    }
}
