use serde::Deserialize;

#[derive(Deserialize, Default)]
pub struct CredoConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Deserialize)]
pub struct StoreConfig {
    /// "memory" or "sqlite".
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_db_path(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_backend() -> String {
    "memory".to_string()
}
fn default_db_path() -> String {
    "./credo-data/credo.db".to_string()
}

impl CredoConfig {
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: CredoConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.backend, "memory");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: CredoConfig = toml::from_str(
            "[server]\nport = 8080\n\n[store]\nbackend = \"sqlite\"\n",
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.store.path, "./credo-data/credo.db");
    }
}
