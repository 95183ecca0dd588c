//! Permission model of the publication portal back office.

#![forbid(unsafe_code)]

mod catalog;
mod detailed_permissions;
mod permission;
mod permission_codec;

pub use catalog::PermissionCatalog;
pub use detailed_permissions::{CategoryGrants, DetailedPermissions};
pub use permission::{PERMISSION_SEPARATOR, PermissionString, split_permission};
pub use permission_codec::{canonical_flat_list, to_detailed, to_flat_list};
