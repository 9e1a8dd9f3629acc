//! Drag session controller
//!
//! One controller per draggable card. It turns the pointer stream for that
//! card into bounds-clamped top-left positions:
//!
//! ```text
//! Idle --primary down--> Dragging --up / cancel (same pointer)--> Idle
//! ```
//!
//! Events carrying any other pointer id are ignored while dragging, so a
//! second finger landing on the floor cannot hijack the card.

use crate::config::CanvasBounds;
use crate::geometry::{Offset, Point};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Platform pointer identity (mouse, pen or one touch contact)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointerId(pub i32);

impl std::fmt::Display for PointerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pointer#{}", self.0)
    }
}

/// Button reported with a pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// A pointer event in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub position: Point,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(pointer_id: PointerId, position: Point, button: PointerButton) -> Self {
        Self {
            pointer_id,
            position,
            button,
        }
    }

    /// Primary-button event, the common case for mouse and touch
    pub fn primary(pointer_id: i32, x: f64, y: f64) -> Self {
        Self::new(PointerId(pointer_id), Point::new(x, y), PointerButton::Primary)
    }
}

/// State of an in-progress drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_id: PointerId,
    /// Pointer position minus card top-left, captured at drag start
    pub offset: Offset,
}

/// Result of feeding a down/up/cancel event to a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTransition {
    /// Idle -> Dragging; the caller should capture this pointer
    Started(PointerId),
    /// Dragging -> Idle; the caller should release this pointer
    Ended(PointerId),
    /// No state change
    Ignored,
}

/// Per-card drag state machine
#[derive(Debug, Clone)]
pub struct DragController {
    bounds: CanvasBounds,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(bounds: CanvasBounds) -> Self {
        Self {
            bounds,
            session: None,
        }
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Update bounds after a canvas resize; an active session is kept
    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = bounds;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_pointer(&self) -> Option<PointerId> {
        self.session.map(|s| s.pointer_id)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Start a drag for a primary-button press on the card at `card_origin`.
    ///
    /// A card that is already dragging ignores further presses.
    pub fn on_pointer_down(&mut self, event: &PointerEvent, card_origin: Point) -> DragTransition {
        if event.button != PointerButton::Primary || self.session.is_some() {
            return DragTransition::Ignored;
        }

        self.session = Some(DragSession {
            pointer_id: event.pointer_id,
            offset: event.position - card_origin,
        });
        DragTransition::Started(event.pointer_id)
    }

    /// New clamped top-left for a move of the active pointer
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Option<Point> {
        let session = self.matching(event)?;
        Some(self.bounds.clamp(event.position - session.offset))
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> DragTransition {
        self.end(event)
    }

    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> DragTransition {
        self.end(event)
    }

    fn end(&mut self, event: &PointerEvent) -> DragTransition {
        match self.matching(event) {
            Some(session) => {
                self.session = None;
                DragTransition::Ended(session.pointer_id)
            }
            None => DragTransition::Ignored,
        }
    }

    fn matching(&self, event: &PointerEvent) -> Option<DragSession> {
        let session = self.session?;
        if session.pointer_id != event.pointer_id {
            trace!(
                active = %session.pointer_id,
                got = %event.pointer_id,
                "Ignoring event from foreign pointer"
            );
            return None;
        }
        Some(session)
    }
}
