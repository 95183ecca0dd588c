use std::fmt::{Display, Formatter};
use std::str::FromStr;

use gazette_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Separator between the category and the action of a permission string.
pub const PERMISSION_SEPARATOR: char = '.';

/// Splits a flat permission value on its first separator.
///
/// Returns `None` when the separator is missing or either half is empty.
/// Anything after the first separator belongs to the action, so
/// `"records.audit.read"` splits into `records` and `audit.read`.
#[must_use]
pub fn split_permission(value: &str) -> Option<(&str, &str)> {
    let (category, action) = value.split_once(PERMISSION_SEPARATOR)?;
    if category.is_empty() || action.is_empty() {
        return None;
    }

    Some((category, action))
}

/// A validated `"<category>.<action>"` permission string.
///
/// Both segments are non-empty and neither contains the separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionString {
    value: String,
    separator_index: usize,
}

impl PermissionString {
    /// Creates a permission string from its flat form.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let Some((category, action)) = split_permission(value.as_str()) else {
            return Err(AppError::Validation(format!(
                "permission '{value}' must have the form '<category>.<action>'"
            )));
        };

        if action.contains(PERMISSION_SEPARATOR) {
            return Err(AppError::Validation(format!(
                "permission '{value}' must contain exactly one '{PERMISSION_SEPARATOR}'"
            )));
        }

        let separator_index = category.len();
        Ok(Self {
            value,
            separator_index,
        })
    }

    /// Creates a permission string from a category and an action.
    pub fn from_parts(category: &str, action: &str) -> AppResult<Self> {
        Self::new(format!("{category}{PERMISSION_SEPARATOR}{action}"))
    }

    /// Returns the category segment.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.value[..self.separator_index]
    }

    /// Returns the action segment.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.value[self.separator_index + PERMISSION_SEPARATOR.len_utf8()..]
    }

    /// Returns the flat storage value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }
}

impl Display for PermissionString {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.value.as_str())
    }
}

impl FromStr for PermissionString {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for PermissionString {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionString> for String {
    fn from(value: PermissionString) -> Self {
        value.value
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{PermissionString, split_permission};

    #[test]
    fn split_uses_first_separator() {
        assert_eq!(split_permission("users.read"), Some(("users", "read")));
        assert_eq!(
            split_permission("records.audit.read"),
            Some(("records", "audit.read"))
        );
    }

    #[test]
    fn split_rejects_missing_or_empty_segments() {
        for value in ["noseparator", "cat.", ".action", "", "."] {
            assert_eq!(split_permission(value), None, "{value}");
        }
    }

    #[test]
    fn permission_string_exposes_segments() {
        let permission = PermissionString::from_str("billing.export");
        assert!(permission.is_ok());

        if let Ok(permission) = permission {
            assert_eq!(permission.category(), "billing");
            assert_eq!(permission.action(), "export");
            assert_eq!(permission.to_string(), "billing.export");
        }
    }

    #[test]
    fn permission_string_rejects_extra_separator() {
        let result = PermissionString::new("records.audit.read");
        assert!(result.is_err());
    }

    #[test]
    fn permission_string_from_parts_validates_segments() {
        assert!(PermissionString::from_parts("users", "").is_err());
        assert!(PermissionString::from_parts("", "read").is_err());
        assert!(PermissionString::from_parts("users", "read").is_ok());
    }

    #[test]
    fn permission_string_deserialization_validates() {
        let valid: Result<PermissionString, _> = serde_json::from_str("\"decrees.publish\"");
        assert!(valid.is_ok());

        let invalid: Result<PermissionString, _> = serde_json::from_str("\"decrees\"");
        assert!(invalid.is_err());
    }
}
