use crate::detailed_permissions::DetailedPermissions;
use crate::permission::PERMISSION_SEPARATOR;

const CONTENT_ACTIONS: &[&str] = &["read", "create", "update", "delete", "publish"];
const DIRECTORY_ACTIONS: &[&str] = &["read", "create", "update", "delete"];
const PERMISSION_ACTIONS: &[&str] = &["read", "manage"];
const AUDIT_ACTIONS: &[&str] = &["read", "export"];
const SETTINGS_ACTIONS: &[&str] = &["read", "update"];

/// Known permission categories and their actions, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl PermissionCatalog {
    /// Creates a catalog from categories with their actions.
    #[must_use]
    pub fn new<C, A>(categories: impl IntoIterator<Item = (C, A)>) -> Self
    where
        C: Into<String>,
        A: IntoIterator,
        A::Item: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(category, actions)| {
                    (
                        category.into(),
                        actions
                            .into_iter()
                            .map(|action| action.as_ref().to_owned())
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    /// Returns the catalog of the official publication portal.
    #[must_use]
    pub fn portal() -> Self {
        Self::new([
            ("laws", CONTENT_ACTIONS),
            ("decrees", CONTENT_ACTIONS),
            ("journals", CONTENT_ACTIONS),
            ("communiques", CONTENT_ACTIONS),
            ("users", DIRECTORY_ACTIONS),
            ("groups", DIRECTORY_ACTIONS),
            ("permissions", PERMISSION_ACTIONS),
            ("audit", AUDIT_ACTIONS),
            ("settings", SETTINGS_ACTIONS),
        ])
    }

    /// Returns whether the catalog knows the pair.
    #[must_use]
    pub fn contains(&self, category: &str, action: &str) -> bool {
        self.categories
            .iter()
            .any(|(name, actions)| name == category && actions.iter().any(|known| known == action))
    }

    /// Iterates every catalog pair in display order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|(category, actions)| {
            actions
                .iter()
                .map(move |action| (category.as_str(), action.as_str()))
        })
    }

    /// Lays the granted pairs out on the full catalog grid.
    ///
    /// Every catalog pair is present, with an explicit `false` where the
    /// input does not grant it. Pairs outside the catalog are left out.
    #[must_use]
    pub fn grid(&self, granted: &DetailedPermissions) -> DetailedPermissions {
        let mut grid = DetailedPermissions::new();
        for (category, action) in self.pairs() {
            grid.set(category, action, granted.is_granted(category, action));
        }

        grid
    }

    /// Returns granted pairs the catalog does not know, as flat strings.
    #[must_use]
    pub fn unknown(&self, granted: &DetailedPermissions) -> Vec<String> {
        granted
            .categories()
            .flat_map(|grants| {
                grants
                    .granted_actions()
                    .filter(|action| !self.contains(grants.name(), action))
                    .map(|action| format!("{}{PERMISSION_SEPARATOR}{action}", grants.name()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
