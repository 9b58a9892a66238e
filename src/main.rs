use slog::o;
use slog::Drain;
use std::io::Read;
use std::{env, fs};

mod error;
mod logging;
mod models;
mod service;
mod spotify;

fn env_or(k: &str, default: &str) -> String {
    env::var(k).unwrap_or_else(|_| default.to_string())
}

lazy_static::lazy_static! {
    pub static ref CONFIG: Config = Config::load();

    // The "base" logger that all modules should branch off of
    pub static ref BASE_LOG: slog::Logger = {
        let level: slog::Level = CONFIG.log_level
                .parse()
                .expect("invalid log_level");
        if CONFIG.log_format == "pretty" {
            let decorator = slog_term::TermDecorator::new().build();
            let drain = slog_term::CompactFormat::new(decorator).build().fuse();
            let drain = slog_async::Async::new(drain).build().fuse();
            let drain = slog::LevelFilter::new(drain, level).fuse();
            slog::Logger::root(drain, o!())
        } else {
            let drain = slog_json::Json::default(std::io::stderr()).fuse();
            let drain = slog_async::Async::new(drain).build().fuse();
            let drain = slog::LevelFilter::new(drain, level).fuse();
            slog::Logger::root(drain, o!())
        }
    };

    // Base logger
    pub static ref LOG: slog::Logger = BASE_LOG.new(slog::o!("app" => "now-playing"));
}

#[derive(serde::Deserialize)]
pub struct Config {
    pub version: String,
    pub ssl: bool,
    pub host: String,
    pub port: u16,
    pub log_format: String,
    pub log_level: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
    pub spotify_refresh_token: String,
    pub http_timeout_seconds: u64,
}
impl Config {
    pub fn load() -> Self {
        let version = fs::File::open("commit_hash.txt")
            .map(|mut f| {
                let mut s = String::new();
                f.read_to_string(&mut s).expect("Error reading commit_hash");
                s
            })
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            version,
            ssl: env_or("SSL", "false") == "true",
            host: env_or("HOST", "localhost"),
            port: env_or("PORT", "3030").parse().expect("invalid port"),
            log_format: env_or("LOG_FORMAT", "json")
                .to_lowercase()
                .trim()
                .to_string(),
            log_level: env_or("LOG_LEVEL", "INFO"),
            // spotify credentials are required, but only checked when the
            // api client is constructed so tests can inject their own
            spotify_client_id: env_or("SPOTIFY_CLIENT_ID", ""),
            spotify_client_secret: env_or("SPOTIFY_CLIENT_SECRET", ""),
            spotify_refresh_token: env_or("SPOTIFY_REFRESH_TOKEN", ""),
            http_timeout_seconds: env_or("HTTP_TIMEOUT_SECONDS", "5")
                .parse()
                .expect("invalid http_timeout_seconds"),
        }
    }
    pub fn initialize(&self) -> anyhow::Result<()> {
        slog::info!(
            LOG, "initialized config";
            "version" => &CONFIG.version,
            "ssl" => &CONFIG.ssl,
            "host" => &CONFIG.host,
            "port" => &CONFIG.port,
            "log_format" => &CONFIG.log_format,
            "log_level" => &CONFIG.log_level,
            "http_timeout_seconds" => &CONFIG.http_timeout_seconds,
        );
        Ok(())
    }
    pub fn host(&self) -> String {
        let p = if self.ssl { "https" } else { "http" };
        format!("{}://{}:{}", p, self.host, self.port)
    }
}

/// Build a `tide::Response`, either a json body from anything
/// serializable or a plain-text body with an explicit status.
#[macro_export]
macro_rules! resp {
    (json => $body:expr) => {
        tide::Response::builder(200)
            .body(tide::Body::from_json(&$body)?)
            .build()
    };
    (status => $status:expr, body => $body:expr) => {
        tide::Response::builder($status)
            .content_type(tide::http::mime::PLAIN)
            .body($body)
            .build()
    };
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    // try sourcing a .env if one exists
    dotenv::dotenv().ok();
    CONFIG.initialize()?;
    service::start().await?;
    Ok(())
}
