use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Where class content units and their manifest are served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSourceKind {
    /// Local static asset directory.
    Fs,
    /// Static asset path of a deployment, fetched over HTTP.
    Http,
}

/// Static class content settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub source: ContentSourceKind,
    /// Root directory for the `fs` source.
    pub root: PathBuf,
    /// Base URL for the `http` source.
    pub base_url: String,
    /// Manifest path relative to the root/base URL.
    pub manifest: String,
    /// Directory holding one YAML file per class, relative to the root/base URL.
    pub classes_dir: String,
    /// Enumerate `classes_dir` when the manifest is unavailable.
    pub directory_fallback: bool,
    /// Hosts whose image URLs are rewritten to locally served paths.
    pub image_hosts: Vec<String>,
    /// Public path prefix of the locally served class images.
    pub image_path: String,
    pub request_timeout_secs: u64,
}

/// API security knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub discord: DiscordConfig,
    pub jwt: JwtConfig,
}

/// Discord OAuth application and the guild that gates sign-in.
///
/// Credentials have no defaults; an empty value is reported as a configuration error
/// when the sign-in flow runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    pub client_id: String,
    pub client_secret: String,
    pub guild_id: String,
    pub redirect_uri: String,
    pub api_base: String,
    pub authorize_url: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HS256 signing key; no default, sign-in is refused until it is set.
    pub secret: String,
    pub issuer: String,
    pub ttl_seconds: u64,
}

/// Tracing subscriber settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`trace`..`error`); `RUST_LOG` still wins.
    pub level: String,
    pub env_filter: Option<String>,
    pub console: bool,
    pub json: bool,
    /// Directory for rolling log files; console only when absent.
    pub path: Option<PathBuf>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 3000, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: ContentSourceKind::Fs,
            root: PathBuf::from("public"),
            base_url: "http://localhost:3000".to_owned(),
            manifest: "data/class-list.json".to_owned(),
            classes_dir: "data/classes".to_owned(),
            directory_fallback: true,
            image_hosts: vec!["cdn.angelssword.com".to_owned()],
            image_path: "/images/classes".to_owned(),
            request_timeout_secs: 15,
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            guild_id: String::new(),
            redirect_uri: "http://localhost:3000/api/auth/discord/callback".to_owned(),
            api_base: "https://discord.com/api".to_owned(),
            authorize_url: "https://discord.com/oauth2/authorize".to_owned(),
            scopes: ["identify", "email", "guilds", "guilds.members.read"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self { secret: String::new(), issuer: "lctools".to_owned(), ttl_seconds: 3600 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), env_filter: None, console: true, json: false, path: None }
    }
}
