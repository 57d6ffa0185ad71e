use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub addr: SocketAddr,
    pub api_key: Option<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            api_key: None,
        }
    }
}

impl MockConfig {
    /// `MOCK_API_ADDR` and `MOCK_API_KEY` override the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(addr) = std::env::var("MOCK_API_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            cfg.addr = addr;
        }
        cfg.api_key = std::env::var("MOCK_API_KEY").ok().filter(|k| !k.is_empty());
        cfg
    }
}
