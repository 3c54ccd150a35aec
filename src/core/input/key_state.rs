//=========================================================================
// Key State
//=========================================================================
//
// Set of keys currently held plus the last known pointer position.
//
// Architecture:
//   InputEvent → process() → HashSet<KeyCode> (held) → query
//
// Hosts that poll the keyboard themselves may bypass `process` and call
// `force_key_down` / `force_key_up` directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== KeyState ============================================================

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    keys_down: HashSet<KeyCode>,
    pointer: (f64, f64),
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    /// Applies a keyboard or pointer event. Other events are ignored.
    pub fn process(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => self.force_key_down(key),
            InputEvent::KeyUp(key) => self.force_key_up(key),
            InputEvent::PointerMoved { x, y } | InputEvent::Click { x, y, .. } => {
                self.pointer = (x, y);
            }
            InputEvent::Unidentified => {}
        }
    }

    /// Marks `key` held. Repeated presses are idempotent.
    pub fn force_key_down(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            trace!("Key down: {:?}", key);
        }
    }

    /// Marks `key` released. Releasing an unheld key is a no-op.
    pub fn force_key_up(&mut self, key: KeyCode) {
        if self.keys_down.remove(&key) {
            trace!("Key up: {:?}", key);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_up(&self, key: KeyCode) -> bool {
        !self.is_key_down(key)
    }

    /// `true` if every key in `keys` is held. Vacuously true when empty.
    pub fn all_keys_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().all(|&k| self.is_key_down(k))
    }

    /// `true` if no key in `keys` is held. Vacuously true when empty.
    pub fn all_keys_up(&self, keys: &[KeyCode]) -> bool {
        keys.iter().all(|&k| self.is_key_up(k))
    }

    pub fn some_keys_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_key_down(k))
    }

    pub fn some_keys_up(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|&k| self.is_key_up(k))
    }

    /// Number of keys currently held.
    pub fn num_keys(&self) -> usize {
        self.keys_down.len()
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Last pointer position seen, in stage space.
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::MouseButton;

    #[test]
    fn press_and_release_track_count() {
        let mut keys = KeyState::new();

        keys.process(&InputEvent::KeyDown(KeyCode::ArrowLeft));
        keys.process(&InputEvent::KeyDown(KeyCode::ArrowLeft));
        keys.process(&InputEvent::KeyDown(KeyCode::Space));
        assert_eq!(keys.num_keys(), 2);

        keys.process(&InputEvent::KeyUp(KeyCode::ArrowLeft));
        keys.process(&InputEvent::KeyUp(KeyCode::KeyZ));
        assert_eq!(keys.num_keys(), 1);
        assert!(keys.is_key_up(KeyCode::ArrowLeft));
        assert!(keys.is_key_down(KeyCode::Space));
    }

    #[test]
    fn group_queries() {
        let mut keys = KeyState::new();
        keys.force_key_down(KeyCode::KeyW);
        keys.force_key_down(KeyCode::KeyA);

        let held = [KeyCode::KeyW, KeyCode::KeyA];
        let mixed = [KeyCode::KeyW, KeyCode::KeyS];
        let free = [KeyCode::KeyS, KeyCode::KeyD];

        assert!(keys.all_keys_down(&held));
        assert!(!keys.all_keys_down(&mixed));
        assert!(keys.some_keys_down(&mixed));
        assert!(keys.some_keys_up(&mixed));
        assert!(keys.all_keys_up(&free));
        assert!(!keys.some_keys_up(&held));
        assert!(keys.all_keys_down(&[]));
    }

    #[test]
    fn pointer_follows_pointer_events() {
        let mut keys = KeyState::new();
        keys.process(&InputEvent::PointerMoved { x: 5.0, y: 6.0 });
        assert_eq!(keys.pointer(), (5.0, 6.0));

        keys.process(&InputEvent::Click { x: 1.0, y: 2.0, button: MouseButton::Left });
        keys.process(&InputEvent::Unidentified);
        assert_eq!(keys.pointer(), (1.0, 2.0));
    }
}
