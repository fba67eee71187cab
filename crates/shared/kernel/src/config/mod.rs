use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment prefix for configuration overrides (`LCT__CONTENT__ROOT=...`).
pub const ENV_PREFIX: &str = "LCT";
/// Variable naming the configuration file when no explicit path is given.
pub const CONFIG_PATH_VAR: &str = "LCT_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "server";

/// Custom error type for config loading.
#[lct_derive::lct_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from an optional file overlaid with environment variables.
///
/// 1. **Base File**: `path`, else `$LCT_CONFIG`, else `server` in the working
///    directory (any extension the `config` crate understands). A missing file is not
///    an error: every section has defaults.
/// 2. **Environment Overrides**: variables prefixed with `LCT__`, nested with double
///    underscores (`LCT__SECURITY__DISCORD__CLIENT_SECRET` maps to
///    `security.discord.client_secret`).
///
/// # Errors
/// Returns [`ConfigError`] when a source is malformed or the merged values do not
/// match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(
        || {
            std::env::var_os(CONFIG_PATH_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
        },
        |p| p.as_ref().to_path_buf(),
    );

    info!(path = %effective_path.display(), "Loading configuration");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lct_domain::config::{ApiConfig, ContentSourceKind};
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg: ApiConfig = load_config(Some(dir.path().join("absent"))).unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.content.source, ContentSourceKind::Fs);
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\n\n[content]\nsource = \"http\"\nbase_url = \"https://cdn.example\"\n"
        )
        .unwrap();

        let cfg: ApiConfig = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.content.source, ContentSourceKind::Http);
        assert_eq!(cfg.content.base_url, "https://cdn.example");
        assert_eq!(cfg.content.manifest, "data/class-list.json");
    }

    #[test]
    #[serial]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "[server]\nport = \"not a port\"\n").unwrap();

        let err = load_config::<ApiConfig>(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize config"));
    }
}
