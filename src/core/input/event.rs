//=========================================================================
// Input Event Types
//=========================================================================
//
// Portable representation of host input.
//
// Host Layer (winit, browser shim, replay file)
//         ↓
//    InputEvent (this module)
//         ↓
//    Stage::handle_input ─┬─> KeyState     (held keys, pointer)
//                         └─> click dispatch (Click events on nodes)
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key, independent of layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,

    /// A key the host reported but this enum does not name.
    Unidentified,
}

//=== InputEvent ==========================================================

/// One input occurrence delivered by the host.
///
/// Pointer coordinates are in stage space (pixels, top-left origin).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    PointerMoved { x: f64, y: f64 },
    /// A completed click (press and release) at a stage position.
    Click { x: f64, y: f64, button: MouseButton },
    /// Host event with no portable meaning; ignored.
    Unidentified,
}

impl InputEvent {
    pub fn is_keyboard(&self) -> bool {
        matches!(self, Self::KeyDown(_) | Self::KeyUp(_))
    }

    /// Stage position carried by pointer events.
    pub fn position(&self) -> Option<(f64, f64)> {
        match *self {
            Self::PointerMoved { x, y } | Self::Click { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_carry_position() {
        let click = InputEvent::Click { x: 3.0, y: 4.0, button: MouseButton::Left };
        assert_eq!(click.position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::KeyDown(KeyCode::KeyA).position(), None);
    }

    #[test]
    fn keyboard_classification() {
        assert!(InputEvent::KeyUp(KeyCode::Space).is_keyboard());
        assert!(!InputEvent::Unidentified.is_keyboard());
    }
}
