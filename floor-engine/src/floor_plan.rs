//! Floor plan orchestrator
//!
//! Owns the placed cards for one UI session. Each refresh replaces the
//! cards with a freshly resolved [`Placement`](crate::Placement); in admin
//! mode every non-merged card gets its own [`DragController`]. Pointer
//! events are routed through an explicit capture table so a dragged card
//! keeps receiving moves after the pointer leaves it.
//!
//! All methods run on the caller's task. Network calls go through the
//! [`FloorService`]; a UI loop that must keep handling pointer events while
//! a request is in flight can drive the request on [`FloorPlan::service`]
//! itself and hand the outcome to [`FloorPlan::finish_refresh`].

use crate::config::{Canvas, CanvasBounds, LayoutConfig};
use crate::drag::{DragController, DragTransition, PointerEvent, PointerId};
use crate::error::{FloorError, FloorResult};
use crate::geometry::Point;
use crate::placement::{PlacementResolver, Suggestion};
use crate::service::FloorService;
use serde::{Deserialize, Serialize};
use shared::{
    AvailabilityQuery, AvailabilityResponse, DisplayState, MealSuggestion, TableLayoutUpdate,
    TableRecommendation,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LOAD_FAILED: &str = "Failed to load availability.";
const SAVE_FAILED: &str = "Failed to save the table layout.";

/// Severity of the message shown above the floor plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusLevel {
    Info,
    Error,
}

/// User-visible status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }
}

/// Current position of one card, as read for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl CardPosition {
    pub fn to_layout_update(&self) -> TableLayoutUpdate {
        TableLayoutUpdate::from_position(self.id.clone(), self.x, self.y)
    }
}

/// A rendered table card
#[derive(Debug, Clone)]
pub struct Card {
    item: TableRecommendation,
    position: Point,
    drag: Option<DragController>,
}

impl Card {
    pub fn id(&self) -> &str {
        self.item.id()
    }

    pub fn item(&self) -> &TableRecommendation {
        &self.item
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn display_state(&self) -> DisplayState {
        self.item.display_state()
    }

    pub fn is_merged(&self) -> bool {
        self.item.merged
    }

    /// Whether a drag controller is attached
    pub fn is_draggable(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.as_ref().is_some_and(DragController::is_dragging)
    }
}

/// Floor plan state for one UI session
pub struct FloorPlan<S: FloorService> {
    service: Arc<S>,
    config: LayoutConfig,
    canvas: Canvas,
    query: AvailabilityQuery,
    admin_mode: bool,
    cards: Vec<Card>,
    /// Pointer capture: which card receives move/up/cancel for a pointer
    captures: HashMap<PointerId, String>,
    status: Option<StatusMessage>,
    algorithm_info: String,
    meal_suggestion: Option<MealSuggestion>,
}

impl<S: FloorService> FloorPlan<S> {
    pub fn new(service: S, config: LayoutConfig, canvas: Canvas, query: AvailabilityQuery) -> Self {
        Self::with_shared_service(Arc::new(service), config, canvas, query)
    }

    pub fn with_shared_service(
        service: Arc<S>,
        config: LayoutConfig,
        canvas: Canvas,
        query: AvailabilityQuery,
    ) -> Self {
        Self {
            service,
            config,
            canvas,
            query,
            admin_mode: false,
            cards: Vec::new(),
            captures: HashMap::new(),
            status: None,
            algorithm_info: String::new(),
            meal_suggestion: None,
        }
    }

    // ========== Accessors ==========

    /// Shared handle to the backend, usable while the plan handles events
    pub fn service(&self) -> Arc<S> {
        Arc::clone(&self.service)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.config.bounds(self.canvas)
    }

    pub fn query(&self) -> &AvailabilityQuery {
        &self.query
    }

    pub fn is_admin_mode(&self) -> bool {
        self.admin_mode
    }

    /// Cards in the order the backend listed them
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn algorithm_info(&self) -> &str {
        &self.algorithm_info
    }

    pub fn meal_suggestion(&self) -> Option<&MealSuggestion> {
        self.meal_suggestion.as_ref()
    }

    /// Replace the query used by the next refresh
    pub fn set_query(&mut self, query: AvailabilityQuery) {
        self.query = query;
    }

    /// Resize the canvas, pulling cards back inside the new bounds
    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        let bounds = self.bounds();
        for card in &mut self.cards {
            card.position = bounds.clamp(card.position);
            if let Some(drag) = card.drag.as_mut() {
                drag.set_bounds(bounds);
            }
        }
    }

    // ========== Refresh ==========

    /// Fetch availability for the current query and rebuild the cards.
    ///
    /// On failure the previous cards stay and an error status is set.
    pub async fn refresh(&mut self) -> FloorResult<()> {
        if let Err(e) = self.query.validate() {
            self.status = Some(StatusMessage::error(e.to_string()));
            return Err(e.into());
        }
        let result = self.service.fetch_availability(&self.query).await;
        self.finish_refresh(result)
    }

    /// Apply the outcome of an availability request
    pub fn finish_refresh(&mut self, result: FloorResult<AvailabilityResponse>) -> FloorResult<()> {
        match result {
            Ok(response) => {
                self.apply_availability(response);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Availability refresh failed, keeping previous layout");
                self.status = Some(StatusMessage::error(LOAD_FAILED));
                Err(e)
            }
        }
    }

    /// Rebuild the cards from an availability response.
    ///
    /// A card that is mid-drag and still eligible keeps its live position and
    /// its session; the resolver pins it there so the rest of the floor is
    /// laid out around it.
    pub fn apply_availability(&mut self, response: AvailabilityResponse) {
        let bounds = self.bounds();
        let admin_mode = self.admin_mode;

        let mut live: HashMap<String, (Point, DragController)> = self
            .cards
            .drain(..)
            .filter_map(|card| match card.drag {
                Some(drag) if drag.is_dragging() => Some((card.item.table.id, (card.position, drag))),
                _ => None,
            })
            .collect();

        let placement = {
            let suggestions: Vec<Suggestion<'_>> = response.tables.iter().map(Suggestion::from_item).collect();
            let pinned: Vec<Suggestion<'_>> = response
                .tables
                .iter()
                .filter(|item| admin_mode && !item.merged)
                .filter_map(|item| live.get(item.id()).map(|(position, _)| Suggestion::new(item.id(), *position)))
                .collect();
            PlacementResolver::new(&self.config, self.canvas).resolve_around(&suggestions, &pinned)
        };

        self.cards = response
            .tables
            .into_iter()
            .map(|item| {
                let eligible = admin_mode && !item.merged;
                let (position, drag) = match live.remove(item.id()) {
                    Some((position, mut drag)) if eligible => {
                        drag.set_bounds(bounds);
                        (bounds.clamp(position), Some(drag))
                    }
                    kept => {
                        if let Some((_, drag)) = kept {
                            debug!(id = item.id(), pointer = ?drag.active_pointer(), "Dropping drag session of ineligible card");
                        }
                        let position = placement
                            .get(item.id())
                            .unwrap_or_else(|| bounds.clamp(Suggestion::from_item(&item).position));
                        (position, eligible.then(|| DragController::new(bounds)))
                    }
                };
                Card { item, position, drag }
            })
            .collect();

        for (id, _) in live {
            debug!(id = %id, "Dropping drag session of card removed by refresh");
        }
        self.prune_captures();

        self.status = (!response.algorithm_info.is_empty())
            .then(|| StatusMessage::info(response.algorithm_info.clone()));
        self.algorithm_info = response.algorithm_info;
        self.meal_suggestion = response.meal_suggestion;

        info!(
            cards = self.cards.len(),
            exhausted = placement.exhausted().len(),
            admin = admin_mode,
            "Floor plan refreshed"
        );
    }

    // ========== Admin mode ==========

    /// Switch admin mode and refresh.
    ///
    /// Controllers are attached or detached immediately, so a failed refresh
    /// cannot leave cards draggable outside admin mode.
    pub async fn set_admin_mode(&mut self, enabled: bool) -> FloorResult<()> {
        self.admin_mode = enabled;
        let bounds = self.bounds();
        for card in &mut self.cards {
            let eligible = enabled && !card.item.merged;
            match (eligible, card.drag.is_some()) {
                (true, false) => card.drag = Some(DragController::new(bounds)),
                (false, true) => card.drag = None,
                _ => {}
            }
        }
        self.prune_captures();
        debug!(enabled, "Admin mode toggled");
        self.refresh().await
    }

    // ========== Pointer routing ==========

    /// Pointer-down delivered to the card `card_id`.
    ///
    /// Cards without a controller (merged, or admin mode off) are inert.
    pub fn on_pointer_down(&mut self, card_id: &str, event: &PointerEvent) -> DragTransition {
        if self.captures.contains_key(&event.pointer_id) {
            return DragTransition::Ignored;
        }
        let Some(card) = self.cards.iter_mut().find(|c| c.id() == card_id) else {
            return DragTransition::Ignored;
        };
        let origin = card.position;
        let Some(drag) = card.drag.as_mut() else {
            return DragTransition::Ignored;
        };

        let transition = drag.on_pointer_down(event, origin);
        if let DragTransition::Started(pointer) = transition {
            debug!(id = card_id, %pointer, "Drag started");
            self.captures.insert(pointer, card_id.to_string());
        }
        transition
    }

    /// Pointer-move; returns the captured card's new position
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Option<Point> {
        let card_id = self.captures.get(&event.pointer_id)?;
        let card = self.cards.iter_mut().find(|c| c.id() == card_id)?;
        let position = card.drag.as_mut()?.on_pointer_move(event)?;
        card.position = position;
        Some(position)
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> DragTransition {
        self.release(event, DragController::on_pointer_up)
    }

    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> DragTransition {
        self.release(event, DragController::on_pointer_cancel)
    }

    fn release(
        &mut self,
        event: &PointerEvent,
        end: fn(&mut DragController, &PointerEvent) -> DragTransition,
    ) -> DragTransition {
        let Some(card_id) = self.captures.get(&event.pointer_id).cloned() else {
            return DragTransition::Ignored;
        };
        let transition = self
            .cards
            .iter_mut()
            .find(|c| c.id() == card_id)
            .and_then(|c| c.drag.as_mut())
            .map_or(DragTransition::Ignored, |drag| end(drag, event));

        match transition {
            DragTransition::Ended(pointer) => {
                debug!(id = card_id, %pointer, "Drag ended");
                self.captures.remove(&pointer);
            }
            _ => {
                // the capturing card is gone or no longer dragging
                self.captures.remove(&event.pointer_id);
            }
        }
        transition
    }

    /// Drop captures whose card no longer drags with that pointer
    fn prune_captures(&mut self) {
        let cards = &self.cards;
        self.captures.retain(|pointer, id| {
            cards.iter().any(|c| {
                c.id() == id.as_str() && c.drag.as_ref().and_then(DragController::active_pointer) == Some(*pointer)
            })
        });
    }

    // ========== Persistence ==========

    /// Current positions of every non-merged card, including live drags
    pub fn snapshot_positions(&self) -> Vec<CardPosition> {
        self.cards
            .iter()
            .filter(|c| !c.is_merged())
            .map(|c| CardPosition {
                id: c.id().to_string(),
                x: c.position.x,
                y: c.position.y,
            })
            .collect()
    }

    /// Persist the current positions, then refresh so they come back as
    /// suggestions. On failure nothing on screen changes.
    pub async fn save_layout(&mut self) -> FloorResult<()> {
        let updates: Vec<TableLayoutUpdate> = self
            .snapshot_positions()
            .iter()
            .map(CardPosition::to_layout_update)
            .collect();

        if let Err(e) = self.service.save_layout(&updates).await {
            warn!(error = %e, tables = updates.len(), "Saving layout failed");
            self.status = Some(StatusMessage::error(SAVE_FAILED));
            return Err(match e {
                FloorError::Persist(_) => e,
                other => FloorError::Persist(other.to_string()),
            });
        }

        info!(tables = updates.len(), "Layout saved");
        self.refresh().await
    }
}
