use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Fixed admission fee charged for the mandatory entry ticket.
    pub entry_ticket_amount: i64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Baked-in defaults so the demo runs with no config files at all
            .set_default("server.port", 5000)?
            .set_default("database.url", "sqlite://rentis.db")?
            .set_default("business_rules.entry_ticket_amount", 150)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `RENTIS_SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("RENTIS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
