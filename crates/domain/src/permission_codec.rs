use crate::detailed_permissions::DetailedPermissions;
use crate::permission::{PERMISSION_SEPARATOR, split_permission};

/// Flattens a detailed permission set into `"category.action"` strings.
///
/// Only granted pairs are emitted, in category then action insertion order.
#[must_use]
pub fn to_flat_list(detailed: &DetailedPermissions) -> Vec<String> {
    detailed
        .categories()
        .flat_map(|grants| {
            grants
                .granted_actions()
                .map(move |action| format!("{}{PERMISSION_SEPARATOR}{action}", grants.name()))
        })
        .collect()
}

/// Same as [`to_flat_list`] but sorted and without duplicates.
#[must_use]
pub fn canonical_flat_list(detailed: &DetailedPermissions) -> Vec<String> {
    let mut flat = to_flat_list(detailed);
    flat.sort_unstable();
    flat.dedup();
    flat
}

/// Builds a detailed permission set from flat permission strings.
///
/// Entries without a separator or with an empty segment are skipped.
/// Repeated entries collapse into one grant.
#[must_use]
pub fn to_detailed<I, S>(flat: I) -> DetailedPermissions
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut detailed = DetailedPermissions::new();
    for value in flat {
        if let Some((category, action)) = split_permission(value.as_ref()) {
            detailed.grant(category, action);
        }
    }

    detailed
}
