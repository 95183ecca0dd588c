//! Nested category → action → grant view of a permission set.
//!
//! This is the shape the admin checkbox grid works with. Categories and
//! actions keep the order in which they were first inserted, so a value
//! read from a JSON document renders in document order.

use std::collections::HashMap;
use std::fmt::Formatter;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Action grants within one category.
#[derive(Debug, Clone)]
pub struct CategoryGrants {
    name: String,
    actions: Vec<(String, bool)>,
    positions: HashMap<String, usize>,
}

impl CategoryGrants {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Iterates action names with their grant flag in insertion order.
    pub fn actions(&self) -> impl Iterator<Item = (&str, bool)> {
        self.actions
            .iter()
            .map(|(action, granted)| (action.as_str(), *granted))
    }

    /// Iterates granted action names in insertion order.
    pub fn granted_actions(&self) -> impl Iterator<Item = &str> {
        self.actions()
            .filter_map(|(action, granted)| granted.then_some(action))
    }

    /// Returns the flag recorded for an action, if any.
    #[must_use]
    pub fn flag(&self, action: &str) -> Option<bool> {
        self.positions
            .get(action)
            .map(|position| self.actions[*position].1)
    }

    /// Returns whether an action is granted. Absent actions are not granted.
    #[must_use]
    pub fn is_granted(&self, action: &str) -> bool {
        self.flag(action).unwrap_or(false)
    }

    /// Returns the number of recorded actions, granted or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns whether no action is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn set(&mut self, action: &str, granted: bool) {
        match self.positions.get(action).copied() {
            Some(position) => self.actions[position].1 = granted,
            None => {
                self.positions.insert(action.to_owned(), self.actions.len());
                self.actions.push((action.to_owned(), granted));
            }
        }
    }
}

/// Insertion-ordered mapping from category to action grants.
#[derive(Debug, Clone, Default)]
pub struct DetailedPermissions {
    categories: Vec<CategoryGrants>,
    positions: HashMap<String, usize>,
}

impl DetailedPermissions {
    /// Creates an empty permission set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a grant flag, creating the category on first reference.
    pub fn set(&mut self, category: &str, action: &str, granted: bool) {
        self.category_entry(category).set(action, granted);
    }

    /// Records a granted action.
    pub fn grant(&mut self, category: &str, action: &str) {
        self.set(category, action, true);
    }

    /// Builder form of [`DetailedPermissions::set`].
    #[must_use]
    pub fn with(mut self, category: &str, action: &str, granted: bool) -> Self {
        self.set(category, action, granted);
        self
    }

    /// Returns whether the pair is granted. Absent pairs are not granted.
    #[must_use]
    pub fn is_granted(&self, category: &str, action: &str) -> bool {
        self.category(category)
            .is_some_and(|grants| grants.is_granted(action))
    }

    /// Returns the grants of one category.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryGrants> {
        self.positions
            .get(name)
            .map(|position| &self.categories[*position])
    }

    /// Iterates categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryGrants> {
        self.categories.iter()
    }

    /// Returns whether no category is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns the number of granted pairs.
    #[must_use]
    pub fn granted_count(&self) -> usize {
        self.categories
            .iter()
            .map(|grants| grants.granted_actions().count())
            .sum()
    }

    /// Returns the canonical form without negative grants.
    ///
    /// Explicit `false` entries are dropped, and so is every category left
    /// without a granted action.
    #[must_use]
    pub fn without_denials(&self) -> Self {
        let mut canonical = Self::new();
        for grants in &self.categories {
            for action in grants.granted_actions() {
                canonical.grant(grants.name(), action);
            }
        }

        canonical
    }

    fn category_entry(&mut self, name: &str) -> &mut CategoryGrants {
        let position = match self.positions.get(name).copied() {
            Some(position) => position,
            None => {
                let position = self.categories.len();
                self.positions.insert(name.to_owned(), position);
                self.categories.push(CategoryGrants::new(name));
                position
            }
        };

        &mut self.categories[position]
    }
}

impl PartialEq for CategoryGrants {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.actions.len() == other.actions.len()
            && self
                .actions
                .iter()
                .all(|(action, granted)| other.flag(action) == Some(*granted))
    }
}

impl Eq for CategoryGrants {}

impl PartialEq for DetailedPermissions {
    fn eq(&self, other: &Self) -> bool {
        self.categories.len() == other.categories.len()
            && self
                .categories
                .iter()
                .all(|grants| other.category(grants.name()) == Some(grants))
    }
}

impl Eq for DetailedPermissions {}

struct ActionFlags<'a>(&'a CategoryGrants);

impl Serialize for ActionFlags<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (action, granted) in self.0.actions() {
            map.serialize_entry(action, &granted)?;
        }
        map.end()
    }
}

impl Serialize for DetailedPermissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for grants in &self.categories {
            map.serialize_entry(grants.name(), &ActionFlags(grants))?;
        }
        map.end()
    }
}

struct ActionFlagsVisitor;

impl<'de> Visitor<'de> for ActionFlagsVisitor {
    type Value = Vec<(String, bool)>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a map of action names to grant flags")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut actions = Vec::new();
        while let Some((action, value)) = access.next_entry::<String, Value>()? {
            actions.push((action, value == Value::Bool(true)));
        }
        Ok(actions)
    }
}

struct ActionFlagsOwned(Vec<(String, bool)>);

impl<'de> Deserialize<'de> for ActionFlagsOwned {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ActionFlagsVisitor).map(Self)
    }
}

struct DetailedPermissionsVisitor;

impl<'de> Visitor<'de> for DetailedPermissionsVisitor {
    type Value = DetailedPermissions;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a map of category names to action grant maps")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut permissions = DetailedPermissions::new();
        while let Some((category, ActionFlagsOwned(actions))) =
            access.next_entry::<String, ActionFlagsOwned>()?
        {
            let grants = permissions.category_entry(category.as_str());
            for (action, granted) in actions {
                grants.set(action.as_str(), granted);
            }
        }
        Ok(permissions)
    }
}

impl<'de> Deserialize<'de> for DetailedPermissions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DetailedPermissionsVisitor)
    }
}
