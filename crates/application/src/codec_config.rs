use std::env;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gazette_core::{AppError, AppResult};

/// Environment variable selecting the decode mode.
pub const DECODE_MODE_ENV: &str = "PERMISSION_DECODE_MODE";

/// How malformed flat permission entries are handled while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Malformed entries are dropped.
    #[default]
    Lenient,
    /// The first malformed entry fails the whole decode.
    Strict,
}

impl DecodeMode {
    /// Returns a stable configuration value for this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl Display for DecodeMode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DecodeMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(AppError::Validation(format!(
                "unknown decode mode '{value}', expected 'lenient' or 'strict'"
            ))),
        }
    }
}

/// Runtime settings for [`crate::PermissionCodec`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Handling of malformed flat entries.
    pub decode_mode: DecodeMode,
}

impl CodecConfig {
    /// Loads settings from process environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads settings through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let decode_mode = match lookup(DECODE_MODE_ENV) {
            Some(value) => value.parse::<DecodeMode>().map_err(|error| {
                AppError::Validation(format!("invalid {DECODE_MODE_ENV} value: {error}"))
            })?,
            None => DecodeMode::default(),
        };

        Ok(Self { decode_mode })
    }
}
