//=========================================================================
// Input
//=========================================================================
//
// Keyboard state and pointer-click hit probing.
//
// Architecture:
//   host ──InputEvent──> Stage ─┬─> KeyState::process
//                               └─> click_probe ─> hit test ─> Click
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod key_state;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton};
pub use key_state::KeyState;

use crate::core::geometry::Rect;

/// Side length of the square probe used to hit-test clicks.
pub const CLICK_PROBE_SIZE: f64 = 3.0;

/// Probe rectangle for a click at stage position `(x, y)`.
pub fn click_probe(x: f64, y: f64) -> Rect {
    Rect::new(x, y, CLICK_PROBE_SIZE, CLICK_PROBE_SIZE)
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_is_anchored_at_click() {
        assert_eq!(click_probe(10.0, 20.0), Rect::new(10.0, 20.0, 3.0, 3.0));
    }
}
