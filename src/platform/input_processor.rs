//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into portable `InputEvent`s.
//
// Architecture:
//   WindowEvent → InputProcessor → InputEvent → InputSender → Stage
//
// Stateful cursor tracking: winit reports button presses without a
// position, so the last `CursorMoved` position is cached and used as the
// location of the click emitted on button release. Unmapped keys are
// filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use super::InputSender;
use crate::core::input::{InputEvent, KeyCode, MouseButton};

//=== InputProcessor ======================================================

/// Stateful winit → `InputEvent` converter.
#[derive(Debug, Default)]
pub struct InputProcessor {
    cursor: (f64, f64),
}

impl InputProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position in window pixels.
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Converts one window event, or returns `None` if it carries no input.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.process_cursor_moved(position.x, position.y))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state)
            }
            WindowEvent::KeyboardInput { event, .. } => self.process_key_event(event),
            _ => None,
        }
    }

    /// Converts `event` and forwards it to the stage through `sender`.
    pub fn forward(&mut self, event: &WindowEvent, sender: &InputSender) -> bool {
        match self.process_window_event(event) {
            Some(input) => sender.send(input),
            None => false,
        }
    }

    //--- Event Processing -------------------------------------------------

    pub fn process_cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = (x, y);
        InputEvent::PointerMoved { x, y }
    }

    /// Emits a `Click` at the cached cursor on release; presses are dropped.
    pub fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<InputEvent> {
        match state {
            ElementState::Pressed => None,
            ElementState::Released => {
                let (x, y) = self.cursor;
                trace!(target: "platform::input", "Click at ({}, {})", x, y);
                Some(InputEvent::Click {
                    x,
                    y,
                    button: MouseButton::from(button),
                })
            }
        }
    }

    pub fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.process_key(key_event.physical_key, key_event.state)
    }

    fn process_key(&self, physical_key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };
        if key == KeyCode::Unidentified {
            trace!(target: "platform::input", "Unmapped key ignored");
            return None;
        }

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps A-Z, 0-9, arrows and common special keys; the rest are
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => Self::Digit0,
            W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2,
            W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4,
            W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6,
            W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8,
            W::Digit9 => Self::Digit9,

            W::KeyA => Self::KeyA,
            W::KeyB => Self::KeyB,
            W::KeyC => Self::KeyC,
            W::KeyD => Self::KeyD,
            W::KeyE => Self::KeyE,
            W::KeyF => Self::KeyF,
            W::KeyG => Self::KeyG,
            W::KeyH => Self::KeyH,
            W::KeyI => Self::KeyI,
            W::KeyJ => Self::KeyJ,
            W::KeyK => Self::KeyK,
            W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM,
            W::KeyN => Self::KeyN,
            W::KeyO => Self::KeyO,
            W::KeyP => Self::KeyP,
            W::KeyQ => Self::KeyQ,
            W::KeyR => Self::KeyR,
            W::KeyS => Self::KeyS,
            W::KeyT => Self::KeyT,
            W::KeyU => Self::KeyU,
            W::KeyV => Self::KeyV,
            W::KeyW => Self::KeyW,
            W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY,
            W::KeyZ => Self::KeyZ,

            W::ArrowUp => Self::ArrowUp,
            W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft,
            W::ArrowRight => Self::ArrowRight,

            W::Space => Self::Space,
            W::Enter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,
            W::ShiftLeft => Self::ShiftLeft,
            W::ShiftRight => Self::ShiftRight,
            W::ControlLeft => Self::ControlLeft,
            W::ControlRight => Self::ControlRight,

            _ => Self::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => Self::Left,
            WinitMouseButton::Right => Self::Right,
            WinitMouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input_channel;

    #[test]
    fn click_uses_last_cursor_position() {
        let mut processor = InputProcessor::new();
        processor.process_cursor_moved(40.0, 25.5);

        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            None
        );
        assert_eq!(
            processor.process_mouse_button(WinitMouseButton::Left, ElementState::Released),
            Some(InputEvent::Click { x: 40.0, y: 25.5, button: MouseButton::Left })
        );
    }

    #[test]
    fn keys_map_to_down_and_up() {
        let processor = InputProcessor::new();
        let space = PhysicalKey::Code(WinitKeyCode::Space);

        assert_eq!(
            processor.process_key(space, ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::Space))
        );
        assert_eq!(
            processor.process_key(space, ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::Space))
        );
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(
            processor.process_key(PhysicalKey::Code(WinitKeyCode::F13), ElementState::Pressed),
            None
        );
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowRight), KeyCode::ArrowRight);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }

    #[test]
    fn forward_sends_converted_events() {
        let (tx, rx) = input_channel(4);
        let mut processor = InputProcessor::new();

        let resized = WindowEvent::Resized(winit::dpi::PhysicalSize::new(10, 10));
        assert!(!processor.forward(&resized, &tx));
        assert!(rx.drain().is_empty());
    }
}
