//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `LUNCHVOTE_*` environment variables and an
//! optional configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use chrono::NaiveTime;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::domain::VotingWindow;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address `{value}` is not a socket address")]
    BindAddress { value: String },
    #[error("vote change cutoff `{value}` must be formatted as HH:MM")]
    Cutoff { value: String },
    #[error("pool max size must be at least 1")]
    PoolSize,
}

/// Runtime configuration for the lunch vote server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "LUNCHVOTE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_address: Option<String>,
    /// PostgreSQL connection URL. Without it the server keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Time of day (`HH:MM`, server-local) from which votes can no longer
    /// be changed.
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub vote_change_cutoff: Option<String>,
    /// Skip applying embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

/// Read a scalar setting as text.
///
/// Environment values such as `11` arrive as numbers; keeping them as text
/// lets [`AppSettings::voting_window`] report them as malformed cutoffs.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(text) => text,
        Scalar::Integer(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
    }))
}

impl AppSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    pub fn bind_address(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse().map_err(|_| SettingsError::BindAddress {
            value: raw.to_owned(),
        })
    }

    /// Voting window built from the configured cutoff, 11:00 by default.
    pub fn voting_window(&self) -> Result<VotingWindow, SettingsError> {
        match self.vote_change_cutoff.as_deref() {
            None => Ok(VotingWindow::default()),
            Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M")
                .map(VotingWindow::new)
                .map_err(|_| SettingsError::Cutoff {
                    value: raw.to_owned(),
                }),
        }
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Result<Option<PoolConfig>, SettingsError> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };
        let mut config = PoolConfig::new(url);
        if let Some(max_size) = self.pool_max_size {
            if max_size == 0 {
                return Err(SettingsError::PoolSize);
            }
            config = config.with_max_size(max_size);
        }
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "LUNCHVOTE_BIND_ADDRESS",
        "LUNCHVOTE_DATABASE_URL",
        "LUNCHVOTE_POOL_MAX_SIZE",
        "LUNCHVOTE_VOTE_CHANGE_CUTOFF",
        "LUNCHVOTE_SKIP_MIGRATIONS",
    ];

    fn load_with(values: &[(&str, &str)]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            let value = values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        }));
        AppSettings::load_from_iter([OsString::from("lunchvote")]).expect("config should load")
    }

    #[rstest]
    fn defaults_use_memory_storage_and_eleven_oclock() {
        let settings = load_with(&[]);

        assert_eq!(
            settings.bind_address(),
            Ok(SocketAddr::from(([0, 0, 0, 0], 8080)))
        );
        assert_eq!(settings.voting_window(), Ok(VotingWindow::default()));
        assert!(settings.pool_config().expect("valid settings").is_none());
        assert!(!settings.skip_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("LUNCHVOTE_BIND_ADDRESS", "127.0.0.1:9090"),
            ("LUNCHVOTE_DATABASE_URL", "postgres://lunchvote@localhost/lunchvote"),
            ("LUNCHVOTE_POOL_MAX_SIZE", "4"),
            ("LUNCHVOTE_VOTE_CHANGE_CUTOFF", "10:30"),
            ("LUNCHVOTE_SKIP_MIGRATIONS", "true"),
        ]);

        assert_eq!(
            settings.bind_address(),
            Ok(SocketAddr::from(([127, 0, 0, 1], 9090)))
        );
        let cutoff = NaiveTime::from_hms_opt(10, 30, 0).expect("valid time");
        assert_eq!(settings.voting_window(), Ok(VotingWindow::new(cutoff)));
        let pool = settings
            .pool_config()
            .expect("valid settings")
            .expect("database configured");
        assert_eq!(pool.database_url(), "postgres://lunchvote@localhost/lunchvote");
        assert_eq!(pool.max_size(), 4);
        assert!(settings.skip_migrations);
    }

    #[rstest]
    #[case("11")]
    #[case("10")]
    #[case("25:00")]
    #[case("eleven")]
    fn malformed_cutoff_is_rejected(#[case] raw: &str) {
        let settings = load_with(&[("LUNCHVOTE_VOTE_CHANGE_CUTOFF", raw)]);
        assert_eq!(
            settings.voting_window(),
            Err(SettingsError::Cutoff {
                value: raw.to_owned()
            })
        );
    }

    #[rstest]
    fn numeric_cutoff_loads_as_text() {
        let settings = load_with(&[("LUNCHVOTE_VOTE_CHANGE_CUTOFF", "10")]);
        assert_eq!(settings.vote_change_cutoff.as_deref(), Some("10"));
    }

    #[rstest]
    fn zero_pool_size_is_rejected() {
        let settings = load_with(&[
            ("LUNCHVOTE_DATABASE_URL", "postgres://localhost/lunchvote"),
            ("LUNCHVOTE_POOL_MAX_SIZE", "0"),
        ]);
        assert!(matches!(settings.pool_config(), Err(SettingsError::PoolSize)));
    }
}
