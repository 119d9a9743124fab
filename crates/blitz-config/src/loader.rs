//! Configuration file loading and error types.

use std::{fs, path::Path};

use crate::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format")]
    UnsupportedFormat,
    #[error("validation: {0}")]
    Validation(String),
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    match path.extension().and_then(|s| s.to_str()).unwrap_or("") {
        "json" | "jsonc" => {
            let stripped = json_comments::StripComments::new(data.as_bytes());
            Ok(serde_json::from_reader(stripped)?)
        }
        "yaml" | "yml" => Ok(serde_yaml::from_str(&data)?),
        "toml" => Ok(toml::from_str(&data)?),
        _ => Err(ConfigError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("blitz-config-test-{name}"));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_toml() {
        let path = write_temp(
            "a.toml",
            "[auth]\n[[auth.accounts]]\nidentity = \"alice\"\nsecret = \"pw\"\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.auth.accounts[0].identity, "alice");
    }

    #[test]
    fn loads_jsonc_with_comments() {
        let path = write_temp(
            "b.jsonc",
            r#"{
  // inline accounts
  "auth": { "accounts": [ { "identity": "alice", "secret": "pw" } ] }
}"#,
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.auth.accounts[0].identity, "alice");
    }

    #[test]
    fn loads_yaml() {
        let path = write_temp(
            "c.yaml",
            "auth:\n  accounts:\n    - identity: alice\n      secret: pw\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.auth.accounts[0].secret, "pw");
    }

    #[test]
    fn rejects_unknown_extension() {
        let path = write_temp("d.ini", "listen=127.0.0.1:1\n");
        assert!(matches!(
            load_config(&path),
            Err(ConfigError::UnsupportedFormat)
        ));
    }
}
