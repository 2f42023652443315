//! Server configuration from the environment

use std::env;

/// Server configuration struct
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Whether to seed demo data at startup
    pub seed_demo_data: bool,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDR`: listen address (default: "0.0.0.0")
    /// - `PORT`: listen port (default: 8080)
    /// - `SEED_DEMO_DATA`: seed demo accounts and apartments (default: true)
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Self {
            bind_addr,
            port,
            seed_demo_data,
        }
    }

    /// Socket address string for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
