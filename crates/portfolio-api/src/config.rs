use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_MODEL: &str = "gpt-5-nano-2025-08-07";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
    pub listen_addr: SocketAddr,
    pub model: String,
}

impl Config {
    /// Optional:
    /// - `PORTFOLIO_ROOT` (default: ".")
    /// - `PORTFOLIO_DATA_DIR` (default: "$PORTFOLIO_ROOT/data")
    /// - `PORTFOLIO_CONTENT_DIR` (default: "$PORTFOLIO_ROOT/content")
    /// - `PORTFOLIO_LISTEN_ADDR` (default: "127.0.0.1:3000")
    /// - `OPENAI_MODEL` (default: "gpt-5-nano-2025-08-07")
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let root = PathBuf::from(var("PORTFOLIO_ROOT").unwrap_or_else(|| ".".to_string()));
        let data_dir = var("PORTFOLIO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("data"));
        let content_dir = var("PORTFOLIO_CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| root.join("content"));

        let listen_addr = var("PORTFOLIO_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr.parse::<SocketAddr>().map_err(|e| {
            AppError::Config(format!("invalid PORTFOLIO_LISTEN_ADDR {listen_addr:?}: {e}"))
        })?;

        let model = var("OPENAI_MODEL")
            .map(|m| m.trim().to_string())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            data_dir,
            content_dir,
            listen_addr,
            model,
        })
    }
}
