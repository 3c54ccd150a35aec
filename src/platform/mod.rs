//=========================================================================
// Platform Bridge
//=========================================================================
//
// Carries host input into the stage across a thread boundary.
//
// Architecture:
// ```text
//  Host Thread:                      Stage Thread:
//  ┌──────────────────────────┐     ┌──────────────────────┐
//  │  winit event loop        │     │  Stage::tick()       │
//  │   ↓                      │     │   ├─ pump_input()    │
//  │  InputProcessor          │     │   ├─ advance_frame() │
//  │   ↓                      │     │   ├─ clear           │
//  │  InputSender ────────────┼───> │   └─ render root     │
//  └──────────────────────────┘     └──────────────────────┘
//            bounded crossbeam channel, drained once per tick
// ```
//
// Key Design Decisions:
// - **Bounded queue**: a stalled stage drops input instead of growing
//   without limit; drops are logged
// - **Graceful disconnect**: a closed stage is logged, the host keeps
//   running so the window can still close
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{trace, warn};

//=== Public API ==========================================================

pub use input_processor::InputProcessor;

use crate::core::input::InputEvent;

//=== Channel =============================================================

/// Creates a bounded host → stage input queue.
///
/// # Panics
/// If `capacity` is zero.
pub fn input_channel(capacity: usize) -> (InputSender, InputReceiver) {
    assert!(capacity > 0, "Input capacity must be positive");
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (InputSender { tx }, InputReceiver { rx })
}

//=== InputSender =========================================================

/// Clonable, `Send` handle the host uses to deliver input.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queues `event` without blocking. Returns `false` if it was dropped.
    pub fn send(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => {
                trace!(target: "platform::input", "Queued {:?}", event);
                true
            }
            Err(TrySendError::Full(event)) => {
                warn!(target: "platform::input", "Input queue full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(event)) => {
                warn!(target: "platform::input", "Stage disconnected, dropping {:?}", event);
                false
            }
        }
    }
}

//=== InputReceiver =======================================================

/// Stage-side end of the input queue.
#[derive(Debug)]
pub struct InputReceiver {
    rx: Receiver<InputEvent>,
}

impl InputReceiver {
    /// Takes every event queued so far, oldest first.
    pub fn drain(&self) -> Vec<InputEvent> {
        self.rx.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[test]
    fn events_arrive_in_order() {
        let (tx, rx) = input_channel(8);
        tx.send(InputEvent::KeyDown(KeyCode::KeyA));
        tx.send(InputEvent::KeyUp(KeyCode::KeyA));

        assert_eq!(
            rx.drain(),
            vec![InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyUp(KeyCode::KeyA)]
        );
        assert!(rx.is_empty());
    }

    #[test]
    fn full_queue_drops_newest() {
        let (tx, rx) = input_channel(1);
        assert!(tx.send(InputEvent::KeyDown(KeyCode::KeyA)));
        assert!(!tx.send(InputEvent::KeyDown(KeyCode::KeyB)));
        assert_eq!(rx.drain(), vec![InputEvent::KeyDown(KeyCode::KeyA)]);
    }

    #[test]
    fn disconnected_stage_is_not_fatal() {
        let (tx, rx) = input_channel(1);
        drop(rx);
        assert!(!tx.send(InputEvent::Unidentified));
    }

    #[test]
    fn sender_crosses_threads() {
        let (tx, rx) = input_channel(4);
        let handle = std::thread::spawn(move || tx.send(InputEvent::KeyDown(KeyCode::Space)));
        assert!(handle.join().unwrap());
        assert_eq!(rx.len(), 1);
    }

    #[test]
    #[should_panic(expected = "Input capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = input_channel(0);
    }
}
