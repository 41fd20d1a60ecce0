use crate::action::{Action, KeyBindings};
use std::collections::{BTreeMap, BTreeSet};

/// Snapshot of the actions held at the start of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub fire: bool,
}

impl FrameInput {
    pub fn is_down(&self, action: Action) -> bool {
        match action {
            Action::RotateLeft => self.rotate_left,
            Action::RotateRight => self.rotate_right,
            Action::Fire => self.fire,
        }
    }
}

/// Current key state, fed by host key events and sampled once per frame.
///
/// Several keys can map to the same action; the action is held while any of
/// them is down.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    keys_down: BTreeMap<String, Action>,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys_down: BTreeMap::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Record a key transition. Unbound keys are ignored.
    pub fn set_key(&mut self, key: &str, pressed: bool) {
        let Some(action) = self.bindings.action_for(key) else {
            tracing::trace!(key, "unbound key ignored");
            return;
        };
        if pressed {
            self.keys_down.insert(key.to_string(), action);
        } else {
            self.keys_down.remove(key);
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.set_key(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.set_key(key, false);
    }

    pub fn is_key_down(&self, key: &str) -> bool {
        self.keys_down.contains_key(key)
    }

    pub fn is_down(&self, action: Action) -> bool {
        self.keys_down.values().any(|a| *a == action)
    }

    /// Release everything, e.g. when the window loses focus and key-up events
    /// would otherwise be lost.
    pub fn clear(&mut self) {
        self.keys_down.clear();
    }

    pub fn held_actions(&self) -> BTreeSet<Action> {
        self.keys_down.values().copied().collect()
    }

    pub fn sample(&self) -> FrameInput {
        FrameInput {
            rotate_left: self.is_down(Action::RotateLeft),
            rotate_right: self.is_down(Action::RotateRight),
            fire: self.is_down(Action::Fire),
        }
    }
}

/// Detects a not-held → held transition between consecutive samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct RisingEdge {
    was_down: bool,
}

impl RisingEdge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's state; true only on the first frame it is held.
    pub fn update(&mut self, down: bool) -> bool {
        let rising = down && !self.was_down;
        self.was_down = down;
        rising
    }

    pub fn was_down(&self) -> bool {
        self.was_down
    }
}
