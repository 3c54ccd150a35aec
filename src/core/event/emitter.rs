//=========================================================================
// Event Emitter
//=========================================================================
//
// Named-event subscription and synchronous dispatch.
//
// Architecture:
//   on(kind, handler) → HashMap<EventKind, Vec<Handler<C>>>
//                              ↓
//   emit(ctx, event)  → snapshot handlers → call each with (&mut C, &Event)
//
// Handlers are reference counted so a dispatch can run from a cloned
// snapshot while the emitter itself stays borrowable (and mutable) by
// the handlers through `ctx`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{Event, EventKind};
use crate::core::scene::NodeId;

//=== Handler =============================================================

/// Event callback. Receives the dispatch context and the stamped event.
pub type Handler<C> = Rc<dyn Fn(&mut C, &Event)>;

//=== EventEmitter ========================================================

/// Per-instance event handler registry.
///
/// Registering the same handler twice yields two invocations. Emission
/// order equals registration order.
pub struct EventEmitter<C: ?Sized> {
    origin: Option<NodeId>,
    handlers: HashMap<EventKind, Vec<Handler<C>>>,
}

impl<C: ?Sized> EventEmitter<C> {
    /// Creates a standalone emitter whose events carry no origin node.
    pub fn new() -> Self {
        Self {
            origin: None,
            handlers: HashMap::new(),
        }
    }

    /// Creates an emitter that stamps `origin` on every emitted event.
    pub fn for_node(origin: NodeId) -> Self {
        Self {
            origin: Some(origin),
            handlers: HashMap::new(),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Appends a handler for `kind`. Never replaces existing handlers.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&mut C, &Event) + 'static,
    {
        self.on_shared(kind, Rc::new(handler));
    }

    /// Appends an already shared handler.
    pub fn on_shared(&mut self, kind: EventKind, handler: Handler<C>) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Returns `true` if at least one handler is registered for `kind`.
    pub fn will_trigger(&self, kind: &EventKind) -> bool {
        self.handlers.get(kind).is_some_and(|list| !list.is_empty())
    }

    /// Number of handlers registered for `kind`.
    pub fn handler_count(&self, kind: &EventKind) -> usize {
        self.handlers.get(kind).map_or(0, Vec::len)
    }

    //--- Dispatch ---------------------------------------------------------

    /// Stamps the event and snapshots the handlers that will receive it.
    ///
    /// Split from [`Dispatch::run`] so callers that own the emitter inside
    /// `C` can release their borrow before the handlers execute.
    pub fn prepare(&self, mut event: Event) -> Dispatch<C> {
        event.emitter = self.origin;
        let handlers = self.handlers.get(&event.kind).cloned().unwrap_or_default();
        Dispatch { event, handlers }
    }

    /// Dispatches `event` to every handler registered for its kind.
    ///
    /// Emitting with zero handlers is a no-op.
    pub fn emit(&self, ctx: &mut C, event: Event) {
        self.prepare(event).run(ctx);
    }
}

impl<C: ?Sized> Default for EventEmitter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for EventEmitter<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, list)| format!("{}x{}", kind.name(), list.len()))
            .collect();

        f.debug_struct("EventEmitter")
            .field("origin", &self.origin)
            .field("handlers", &kinds)
            .finish()
    }
}

//=== Dispatch ============================================================

/// A stamped event plus the handler snapshot that will receive it.
pub struct Dispatch<C: ?Sized> {
    event: Event,
    handlers: Vec<Handler<C>>,
}

impl<C: ?Sized> Dispatch<C> {
    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invokes every handler in registration order.
    pub fn run(self, ctx: &mut C) {
        for handler in &self.handlers {
            handler(ctx, &self.event);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
