/// Default bind address; matches the port the web client targets.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";

/// HTTP server settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `host:port` to bind, from `API_ADDRESS`.
    pub api_address: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_address = lookup("API_ADDRESS")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());

        Self { api_address }
    }
}
