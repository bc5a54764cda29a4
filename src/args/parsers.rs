use std::time::Duration;

use crate::config::parse_duration_value;
use crate::error::ConfigError;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        _ => Err(ConfigError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ConfigError> {
    parse_duration_value(s).map_err(|reason| ConfigError::InvalidDuration {
        value: s.to_owned(),
        reason,
    })
}
