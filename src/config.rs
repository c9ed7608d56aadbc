use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding the trained model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Directory of the static web client
    #[serde(default = "default_client_dir")]
    pub client_dir: PathBuf,

    /// JSON list of artists used by the client for autocomplete
    #[serde(default = "default_artist_list_path")]
    pub artist_list_path: PathBuf,

    /// Number of recommendations returned per request
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("backend/model")
}

fn default_client_dir() -> PathBuf {
    PathBuf::from("client")
}

fn default_artist_list_path() -> PathBuf {
    PathBuf::from("artist.json")
}

fn default_top_k() -> usize {
    5
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            client_dir: default_client_dir(),
            artist_list_path: default_artist_list_path(),
            top_k: default_top_k(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_env() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.model_dir, PathBuf::from("backend/model"));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("MODEL_DIR".to_string(), "/srv/model".to_string()),
            ("TOP_K".to_string(), "10".to_string()),
            ("PORT".to_string(), "9000".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.model_dir, PathBuf::from("/srv/model"));
        assert_eq!(config.top_k, 10);
        assert_eq!(config.port, 9000);
    }
}
