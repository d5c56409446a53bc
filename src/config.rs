use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Backend the original deployment talks to.
pub const DEFAULT_BACKEND_URL: &str = "https://chatbotgemini-6kem.onrender.com/api";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the chat backend API
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Mark session cookies `Secure` (serve over HTTPS)
    #[arg(long, env = "SECURE_COOKIES")]
    pub secure_cookies: Option<bool>,

    /// Log output format: `text` or `json`
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Upper bound on handling one request, backend round trip included.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub secure_cookies: bool,
    /// Transcripts idle longer than this are dropped from memory.
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Layering, lowest to highest priority: defaults, config file,
    /// `CHATAPP_` environment (`CHATAPP_SERVER__PORT=8000`), CLI flags and
    /// their plain env aliases (`PORT`, `BACKEND_URL`, ...).
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 90)?
            .set_default("backend.base_url", DEFAULT_BACKEND_URL)?
            .set_default("backend.timeout_secs", 60)?
            .set_default("session.secure_cookies", false)?
            .set_default("session.idle_timeout_secs", 30 * 60)?
            .set_default("log.format", "text")?
            .set_default("static_dir", "static")?;

        // An explicit file must exist; the cwd fallback is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("CHATAPP")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(secure) = cli.secure_cookies {
            builder = builder.set_override("session.secure_cookies", secure)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("log.format", format.to_lowercase())?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "backend.base_url cannot be empty".to_string(),
            ));
        }
        url::Url::parse(&self.backend.base_url).map_err(|e| {
            config::ConfigError::Message(format!(
                "backend.base_url is not a valid URL ({}): {e}",
                self.backend.base_url
            ))
        })?;
        if self.backend.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.session.idle_timeout_secs == 0 || self.server.request_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "session.idle_timeout_secs and server.request_timeout_secs must be greater than zero"
                    .to_string(),
            ));
        }
        Ok(())
    }
}
