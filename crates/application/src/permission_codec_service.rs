use gazette_core::{AppError, AppResult};
use gazette_domain::{
    DetailedPermissions, PermissionString, canonical_flat_list, split_permission, to_detailed,
    to_flat_list,
};
use tracing::{debug, warn};

use crate::codec_config::{CodecConfig, DecodeMode};

/// Result of a lenient decode with the entries that were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Grants built from the well-formed entries.
    pub permissions: DetailedPermissions,
    /// Malformed entries in input order.
    pub rejected: Vec<String>,
}

/// Application service converting between nested and flat permission sets.
#[derive(Debug, Clone, Default)]
pub struct PermissionCodec {
    config: CodecConfig,
}

impl PermissionCodec {
    /// Creates a codec with the given settings.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Returns the active decode mode.
    #[must_use]
    pub fn decode_mode(&self) -> DecodeMode {
        self.config.decode_mode
    }

    /// Flattens granted pairs for storage or submission.
    #[must_use]
    pub fn encode(&self, detailed: &DetailedPermissions) -> Vec<String> {
        to_flat_list(detailed)
    }

    /// Flattens granted pairs in sorted order without duplicates.
    #[must_use]
    pub fn encode_canonical(&self, detailed: &DetailedPermissions) -> Vec<String> {
        canonical_flat_list(detailed)
    }

    /// Builds the nested view of stored flat permissions.
    pub fn decode<S: AsRef<str>>(&self, flat: &[S]) -> AppResult<DetailedPermissions> {
        match self.config.decode_mode {
            DecodeMode::Lenient => Ok(self.decode_report(flat).permissions),
            DecodeMode::Strict => decode_strict(flat),
        }
    }

    /// Decodes leniently and reports every dropped entry.
    pub fn decode_report<S: AsRef<str>>(&self, flat: &[S]) -> DecodeReport {
        let rejected: Vec<String> = flat
            .iter()
            .map(|value| value.as_ref())
            .filter(|value| split_permission(value).is_none())
            .map(ToOwned::to_owned)
            .collect();

        for value in &rejected {
            debug!(entry = %value, "dropped malformed permission entry");
        }
        if !rejected.is_empty() {
            warn!(
                rejected_count = rejected.len(),
                total_count = flat.len(),
                "dropped malformed permission entries while decoding"
            );
        }

        DecodeReport {
            permissions: to_detailed(flat),
            rejected,
        }
    }
}

fn decode_strict<S: AsRef<str>>(flat: &[S]) -> AppResult<DetailedPermissions> {
    let mut detailed = DetailedPermissions::new();
    for (index, value) in flat.iter().enumerate() {
        let permission = PermissionString::new(value.as_ref()).map_err(|error| match error {
            AppError::Validation(reason) => {
                AppError::Validation(format!("permission entry {index}: {reason}"))
            }
            other => other,
        })?;
        detailed.grant(permission.category(), permission.action());
    }

    debug!(
        granted_count = detailed.granted_count(),
        "decoded permissions in strict mode"
    );
    Ok(detailed)
}
