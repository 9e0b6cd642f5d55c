use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    #[serde(default = "default_db_credential", alias = "db_user")]
    pub db_username: String,
    #[serde(default = "default_db_credential")]
    pub db_password: String,
    #[serde(default = "default_db_database", alias = "db_name")]
    pub db_database: String,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: usize,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Tracing filter directives, e.g. `info,ishocon2_webapp=debug`.
    #[serde(default = "default_rust_log")]
    pub rust_log: String,
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_credential() -> String {
    "ishocon".to_string()
}

fn default_db_database() -> String {
    "ishocon2".to_string()
}

fn default_db_max_connections() -> usize {
    64
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_rust_log() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_host: default_db_host(),
            db_port: default_db_port(),
            db_username: default_db_credential(),
            db_password: default_db_credential(),
            db_database: default_db_database(),
            db_max_connections: default_db_max_connections(),
            address: default_address(),
            port: default_port(),
            rust_log: default_rust_log(),
        }
    }
}

impl AppConfig {
    /// Config file first, then `ISHOCON2_*` environment variables on top.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Toml::file("Config.toml"))
            .merge(Toml::file("../Config.toml"))
            .merge(Env::prefixed("ISHOCON2_"))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    /// Looks up a setting by key name.
    pub fn value(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "db_host" => Ok(self.db_host.clone()),
            "db_port" => Ok(self.db_port.to_string()),
            "db_username" => Ok(self.db_username.clone()),
            "db_password" => Ok(self.db_password.clone()),
            "db_database" => Ok(self.db_database.clone()),
            _ => Err(ConfigError::Undefined(key.to_string())),
        }
    }

    pub fn database_url(&self) -> Result<String, ConfigError> {
        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.value("db_username")?),
            urlencoding::encode(&self.value("db_password")?),
            self.value("db_host")?,
            self.value("db_port")?,
            self.value("db_database")?
        ))
    }
}
