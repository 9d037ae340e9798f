use crate::error::*;
use serde::{Deserialize, Serialize};
use std::env;

pub const NAME_VAR: &str = "TWIG_AUTHOR_NAME";
pub const EMAIL_VAR: &str = "TWIG_AUTHOR_EMAIL";
pub const TZ_OFFSET_VAR: &str = "TWIG_TZ_OFFSET";

/// Largest offset from UTC, in minutes, that still formats as `+HHMM`.
pub const MAX_TZ_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// An EngineConfig supplies the identity recorded on each commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Author and committer name
    pub name: String,

    /// Author and committer email
    pub email: String,

    /// Offset from UTC, in minutes, recorded alongside each commit timestamp
    pub timezone_offset_minutes: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name: "twig".to_string(),
            email: "twig@localhost".to_string(),
            timezone_offset_minutes: 0,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration; missing fields take their default values.
    pub fn from_json(json: &str) -> Result<EngineConfig> {
        let config: EngineConfig = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()
    }

    /// Build a configuration from `TWIG_AUTHOR_NAME`, `TWIG_AUTHOR_EMAIL` and `TWIG_TZ_OFFSET`,
    /// using defaults for any that are unset.
    pub fn from_env() -> Result<EngineConfig> {
        EngineConfig::from_vars(|var| env::var(var).ok())
    }

    fn from_vars<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<EngineConfig> {
        let mut config = EngineConfig::default();
        if let Some(name) = lookup(NAME_VAR) {
            config.name = name;
        }
        if let Some(email) = lookup(EMAIL_VAR) {
            config.email = email;
        }
        if let Some(offset) = lookup(TZ_OFFSET_VAR) {
            config.timezone_offset_minutes = offset
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a number of minutes: {:?}", TZ_OFFSET_VAR, offset)))?;
        }
        config.validate()
    }

    fn validate(self) -> Result<EngineConfig> {
        if self.timezone_offset_minutes.unsigned_abs() > MAX_TZ_OFFSET_MINUTES as u32 {
            return Err(Error::Config(format!(
                "timezone offset {} is outside +/-{} minutes",
                self.timezone_offset_minutes, MAX_TZ_OFFSET_MINUTES
            )));
        }
        Ok(self)
    }
}
