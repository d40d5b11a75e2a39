use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// e.g. "https://api.example.com/rest/workapp"
    pub base_url: String,
    /// Path of the JSON preference file holding session and cache data.
    pub store_path: String,
    /// Connect/read timeout applied to every request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

pub fn load_config(path: &str) -> Result<ClientConfig> {
    let content =
        std::fs::read_to_string(path).context(format!("Failed to read config file: {}", path))?;
    let config: ClientConfig =
        serde_yml::from_str(&content).context("Failed to parse client config YAML")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config() {
        let yaml = r#"
base_url: "http://localhost:8080/rest/workapp"
store_path: "/tmp/asiste/prefs.json"
timeout_secs: 10
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/rest/workapp");
        assert_eq!(config.store_path, "/tmp/asiste/prefs.json");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_timeout_defaults_to_30s() {
        let yaml = r#"
base_url: "http://localhost:8080"
store_path: "/tmp/asiste/prefs.json"
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_config("/definitely/not/here.yaml");
        assert!(result.is_err());
    }
}
