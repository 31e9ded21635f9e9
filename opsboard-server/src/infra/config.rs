//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is honored) with working
//! defaults for local development; CLI flags override on top in `main`.

use tracing::warn;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4100;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://opsboard.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_owned(),
                port: DEFAULT_PORT,
            },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_owned(),
            },
        }
    }
}

impl Config {
    /// Load configuration, reading `.env` first if present.
    pub fn load() -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::info!("loaded .env file");
        }
        Self::from_env()
    }

    fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("OPSBOARD_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("OPSBOARD_PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.server.port = port,
                Err(_) => warn!(
                    value = port,
                    default = DEFAULT_PORT,
                    "OPSBOARD_PORT is not a valid port, using default"
                ),
            }
        }
        if let Ok(url) = std::env::var("OPSBOARD_DATABASE_URL") {
            config.database.url = url;
        } else if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database.url = url;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<OsString>,
    }

    impl EnvVarGuard {
        fn unset(key: &'static str) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: this test owns the variable and restores it on drop.
            unsafe {
                std::env::remove_var(key);
            }
            Self { key, previous }
        }

        fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
            let previous = std::env::var_os(key);
            // SAFETY: this test owns the variable and restores it on drop.
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            // SAFETY: reinstates the variable to its prior state.
            unsafe {
                match &self.previous {
                    Some(prev) => std::env::set_var(self.key, prev),
                    None => std::env::remove_var(self.key),
                }
            }
        }
    }

    // One test so the environment mutations cannot race each other.
    #[test]
    fn env_overrides_and_defaults() {
        let _host = EnvVarGuard::unset("OPSBOARD_HOST");
        let _port = EnvVarGuard::unset("OPSBOARD_PORT");
        let _url = EnvVarGuard::unset("OPSBOARD_DATABASE_URL");
        let _fallback = EnvVarGuard::unset("DATABASE_URL");

        let config = Config::from_env();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);

        {
            let _host = EnvVarGuard::set("OPSBOARD_HOST", "0.0.0.0");
            let _port = EnvVarGuard::set("OPSBOARD_PORT", "9000");
            let _url =
                EnvVarGuard::set("OPSBOARD_DATABASE_URL", "sqlite://ops.db");

            let config = Config::from_env();
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 9000);
            assert_eq!(config.database.url, "sqlite://ops.db");
        }

        {
            let _port = EnvVarGuard::set("OPSBOARD_PORT", "not-a-port");
            let _fallback =
                EnvVarGuard::set("DATABASE_URL", "sqlite://fallback.db");

            let config = Config::from_env();
            assert_eq!(config.server.port, DEFAULT_PORT);
            assert_eq!(config.database.url, "sqlite://fallback.db");
        }
    }
}
