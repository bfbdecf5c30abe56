use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory for the collection blob files. Unset runs the store in memory.
    pub data_dir: Option<PathBuf>,
    /// Shared secret for tokens minted by the external identity provider.
    pub auth_secret: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let data_dir = env::var("DATA_DIR").ok().map(PathBuf::from);
        let auth_secret = env::var("AUTH_SECRET")?;
        Ok(Self {
            host,
            port,
            data_dir,
            auth_secret,
        })
    }
}
