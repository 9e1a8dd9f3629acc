//! # floor-engine
//!
//! Layout engine for the restaurant floor plan.
//!
//! ## Scope
//!
//! This crate decides WHERE table cards go:
//! - Collision primitives (`geometry`)
//! - Initial placement of server-suggested positions (`placement`)
//! - Per-card pointer drag state machine (`drag`)
//! - Session orchestration, pointer capture and persistence (`floor_plan`)
//!
//! Fetching availability and saving layouts is delegated to a
//! [`FloorService`] implementation (see `floor-client`). Drawing the cards
//! stays with the embedding UI.
//!
//! ## Example
//!
//! ```ignore
//! use floor_engine::{Canvas, FloorPlan, LayoutConfig, PointerEvent};
//!
//! let mut plan = FloorPlan::new(client, LayoutConfig::default(), Canvas::new(760.0, 520.0), query);
//! plan.set_admin_mode(true).await?;
//!
//! plan.on_pointer_down("T3", &PointerEvent::primary(1, 340.0, 100.0));
//! plan.on_pointer_move(&PointerEvent::primary(1, 420.0, 180.0));
//! plan.on_pointer_up(&PointerEvent::primary(1, 420.0, 180.0));
//!
//! plan.save_layout().await?;
//! ```

pub mod config;
pub mod drag;
pub mod error;
pub mod floor_plan;
pub mod geometry;
pub mod placement;
pub mod service;

// Re-exports
pub use config::{Canvas, CanvasBounds, LayoutConfig};
pub use drag::{DragController, DragSession, DragTransition, PointerButton, PointerEvent, PointerId};
pub use error::{FloorError, FloorResult};
pub use floor_plan::{Card, CardPosition, FloorPlan, StatusLevel, StatusMessage};
pub use geometry::{Offset, Point, clamp, overlaps};
pub use placement::{PlacedCard, Placement, PlacementResolver, Suggestion};
pub use service::FloorService;
