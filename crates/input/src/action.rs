use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A high-level action the simulation understands.
///
/// The kernel consumes actions, never raw key identifiers, so rebinding keys
/// never touches game logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    RotateLeft,
    RotateRight,
    Fire,
}

/// Key identifier → action table.
///
/// Identifiers are host key names (`"a"`, `"ArrowLeft"`, `"Space"`); the host
/// is responsible for naming its keys consistently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: BTreeMap<String, Action>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.bindings.insert(key.into(), action);
    }

    pub fn unbind(&mut self, key: &str) -> Option<Action> {
        self.bindings.remove(key)
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut b = Self::empty();
        b.bind("a", Action::RotateLeft);
        b.bind("ArrowLeft", Action::RotateLeft);
        b.bind("d", Action::RotateRight);
        b.bind("ArrowRight", Action::RotateRight);
        b.bind("Space", Action::Fire);
        b.bind(" ", Action::Fire);
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_every_action() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for("a"), Some(Action::RotateLeft));
        assert_eq!(b.action_for("d"), Some(Action::RotateRight));
        assert_eq!(b.action_for("Space"), Some(Action::Fire));
        assert_eq!(b.action_for(" "), Some(Action::Fire));
        assert_eq!(b.action_for("q"), None);
    }

    #[test]
    fn rebinding_replaces_previous_action() {
        let mut b = KeyBindings::empty();
        b.bind("j", Action::RotateLeft);
        b.bind("j", Action::Fire);
        assert_eq!(b.len(), 1);
        assert_eq!(b.action_for("j"), Some(Action::Fire));
        assert_eq!(b.unbind("j"), Some(Action::Fire));
        assert!(b.is_empty());
    }
}
