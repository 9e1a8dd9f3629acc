//! Initial placement resolver
//!
//! Turns server-suggested table positions, which may collide, into a
//! non-overlapping arrangement. Greedy and deterministic: cards are placed
//! top-left first, each one nudged right (wrapping down a row at the right
//! edge) until it clears every card already placed.
//!
//! The resolver never fails. Once a card exhausts its attempt budget it is
//! accepted where the search stopped and reported in
//! [`Placement::exhausted`]; overlap in that case is the accepted cost of
//! always rendering every card.

use crate::config::{Canvas, CanvasBounds, LayoutConfig};
use crate::geometry::{Point, overlaps};
use shared::TableRecommendation;
use std::collections::HashMap;
use tracing::debug;

/// A card waiting to be placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion<'a> {
    pub id: &'a str,
    pub position: Point,
}

impl<'a> Suggestion<'a> {
    pub fn new(id: &'a str, position: Point) -> Self {
        Self { id, position }
    }

    /// Suggestion carried by an availability item
    pub fn from_item(item: &'a TableRecommendation) -> Self {
        Self::new(
            item.id(),
            Point::new(f64::from(item.table.x), f64::from(item.table.y)),
        )
    }
}

/// One resolved card
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCard {
    pub id: String,
    pub position: Point,
    /// Shift steps taken away from the clamped suggestion
    pub attempts: u32,
}

/// Resolved positions keyed by table id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    cards: Vec<PlacedCard>,
    index: HashMap<String, usize>,
    exhausted: Vec<String>,
}

impl Placement {
    pub fn get(&self, id: &str) -> Option<Point> {
        self.index.get(id).map(|&i| self.cards[i].position)
    }

    pub fn card(&self, id: &str) -> Option<&PlacedCard> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Cards in placement order: pinned first, then by suggested y and x
    pub fn iter(&self) -> impl Iterator<Item = &PlacedCard> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Ids of cards accepted after running out of attempts
    pub fn exhausted(&self) -> &[String] {
        &self.exhausted
    }

    fn push(&mut self, card: PlacedCard, exhausted: bool) {
        if exhausted {
            self.exhausted.push(card.id.clone());
        }
        match self.index.get(&card.id) {
            // duplicate id: the later card wins, as a map would
            Some(&i) => self.cards[i] = card,
            None => {
                self.index.insert(card.id.clone(), self.cards.len());
                self.cards.push(card);
            }
        }
    }
}

/// Greedy collision resolver for one canvas
#[derive(Debug, Clone)]
pub struct PlacementResolver<'a> {
    config: &'a LayoutConfig,
    bounds: CanvasBounds,
}

impl<'a> PlacementResolver<'a> {
    pub fn new(config: &'a LayoutConfig, canvas: Canvas) -> Self {
        Self {
            config,
            bounds: config.bounds(canvas),
        }
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    /// Resolve positions for every availability item
    pub fn resolve_items(&self, items: &[TableRecommendation]) -> Placement {
        let suggestions: Vec<_> = items.iter().map(Suggestion::from_item).collect();
        self.resolve(&suggestions)
    }

    pub fn resolve(&self, suggestions: &[Suggestion<'_>]) -> Placement {
        self.resolve_around(suggestions, &[])
    }

    /// Resolve with some cards held in place.
    ///
    /// Pinned cards keep their clamped position and are placed before
    /// everything else, so the remaining cards move around them. A
    /// suggestion sharing an id with a pinned card is skipped.
    pub fn resolve_around(&self, suggestions: &[Suggestion<'_>], pinned: &[Suggestion<'_>]) -> Placement {
        let mut accepted: Vec<Point> = Vec::with_capacity(suggestions.len() + pinned.len());
        let mut placement = Placement::default();

        for pin in pinned {
            let position = self.bounds.clamp(pin.position);
            accepted.push(position);
            placement.push(
                PlacedCard {
                    id: pin.id.to_string(),
                    position,
                    attempts: 0,
                },
                false,
            );
        }

        let mut order: Vec<&Suggestion<'_>> = suggestions
            .iter()
            .filter(|s| !pinned.iter().any(|pin| pin.id == s.id))
            .collect();
        // stable, so identical suggestions keep input order
        order.sort_by(|a, b| {
            a.position
                .y
                .total_cmp(&b.position.y)
                .then(a.position.x.total_cmp(&b.position.x))
        });

        for suggestion in order {
            let (position, attempts, exhausted) = self.place(suggestion.position, &accepted);
            if exhausted {
                debug!(
                    id = suggestion.id,
                    attempts, "Placement attempts exhausted, accepting overlapping position"
                );
            }
            accepted.push(position);
            placement.push(
                PlacedCard {
                    id: suggestion.id.to_string(),
                    position,
                    attempts,
                },
                exhausted,
            );
        }

        placement
    }

    /// Walk from the clamped suggestion until clear of `accepted`.
    ///
    /// Returns the position, the attempts used, and whether it still overlaps.
    fn place(&self, suggested: Point, accepted: &[Point]) -> (Point, u32, bool) {
        let LayoutConfig {
            card_width,
            card_height,
            gap,
            max_attempts,
            ..
        } = *self.config;

        let origin = self.bounds.clamp(suggested);
        let mut candidate = origin;
        let mut attempts = 0;
        let collides = |p: Point| {
            accepted
                .iter()
                .any(|other| overlaps(p, *other, card_width, card_height, gap))
        };

        while attempts < max_attempts && collides(candidate) {
            candidate.x += gap;
            if candidate.x > self.bounds.max_x {
                candidate.x = origin.x;
                candidate.y += gap;
                // past the bottom row the scan resumes from the top band
                if candidate.y > self.bounds.max_y {
                    candidate.y = self.bounds.min_y;
                }
            }
            attempts += 1;
        }

        let exhausted = attempts >= max_attempts && collides(candidate);
        (candidate, attempts, exhausted)
    }
}
