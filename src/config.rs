//! Runtime settings read from the environment (`.env` is honored by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// PostgreSQL URL. When unset, records live in process memory.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    /// Prefix the demo routes are mounted under, e.g. `/people`. Empty mounts at the root.
    pub mount_path: String,
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            mount_path: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `MOUNT_PATH` and `DB_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let mount_path = lookup("MOUNT_PATH").unwrap_or_default();
        validate_mount_path(&mount_path)?;

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            },
        };

        Ok(Settings {
            database_url,
            bind_addr,
            mount_path,
            max_connections,
        })
    }
}

fn validate_mount_path(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Ok(());
    }
    if !path.starts_with('/') || path.ends_with('/') || path.contains("//") {
        return Err(ConfigError::Invalid {
            key: "MOUNT_PATH",
            value: path.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        assert_eq!(settings(&[]).unwrap(), Settings::default());
    }

    #[test]
    fn blank_database_url_means_memory_store() {
        let s = settings(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(s.database_url.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://localhost/demo"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("MOUNT_PATH", "/people"),
            ("DB_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(s.database_url.as_deref(), Some("postgres://localhost/demo"));
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.mount_path, "/people");
        assert_eq!(s.max_connections, 12);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("BIND_ADDR", "nowhere")]).is_err());
        assert!(settings(&[("MOUNT_PATH", "people")]).is_err());
        assert!(settings(&[("MOUNT_PATH", "/people/")]).is_err());
        assert!(settings(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}
