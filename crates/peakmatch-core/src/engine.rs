//! The matching engine.
//!
//! Owns the board for one quiz: both tile columns, the per-side selection,
//! the move/match counters and the queue of pending mismatch resets. All
//! time-dependent behaviour takes an explicit `Instant` so the engine can be
//! driven deterministically by tests and by the front end's event loop.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::error::{QuizError, Result};
use crate::model::{Dataset, SessionStats, Side, Tile, TileRef, TileState};

/// Configuration for the matching engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// How long a mismatched pair stays in the error state.
    pub mismatch_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mismatch_delay: Duration::from_millis(400),
        }
    }
}

/// Receives board changes as they happen (the rendering boundary).
pub trait BoardObserver {
    fn on_tile_changed(&self, tile: TileRef, state: TileState);
    fn on_stats_changed(&self, stats: SessionStats);
    fn on_complete(&self, stats: SessionStats);
}

/// An observer that ignores everything.
pub struct NoopObserver;

impl BoardObserver for NoopObserver {
    fn on_tile_changed(&self, _: TileRef, _: TileState) {}
    fn on_stats_changed(&self, _: SessionStats) {}
    fn on_complete(&self, _: SessionStats) {}
}

impl<O: BoardObserver + ?Sized> BoardObserver for Rc<O> {
    fn on_tile_changed(&self, tile: TileRef, state: TileState) {
        (**self).on_tile_changed(tile, state);
    }
    fn on_stats_changed(&self, stats: SessionStats) {
        (**self).on_stats_changed(stats);
    }
    fn on_complete(&self, stats: SessionStats) {
        (**self).on_complete(stats);
    }
}

/// What a single selection did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tile was already matched; nothing changed.
    Ignored,
    /// The tile is now the selection on its side; no pair to evaluate yet.
    Selected,
    /// The selection completed a correct pair.
    Matched { item_id: u32 },
    /// The selection completed a wrong pair; both tiles revert at `reset_at`.
    Mismatched {
        left: TileRef,
        right: TileRef,
        reset_at: Instant,
    },
    /// The selection completed the last pair. Reported once per quiz.
    Completed { stats: SessionStats },
}

/// A deferred error-to-idle transition for one mismatched pair.
///
/// Each tile is captured together with the error generation it had when the
/// reset was scheduled; a newer error on the same tile makes this reset stale.
#[derive(Debug, Clone, Copy)]
struct PendingReset {
    due: Instant,
    tiles: [(TileRef, u64); 2],
}

/// The selection/matching state machine for one quiz.
pub struct MatchingEngine {
    left: Vec<Tile>,
    right: Vec<Tile>,
    selected_left: Option<usize>,
    selected_right: Option<usize>,
    stats: SessionStats,
    total: u32,
    completed: bool,
    pending: Vec<PendingReset>,
    config: EngineConfig,
    observer: Box<dyn BoardObserver>,
}

impl MatchingEngine {
    /// Lay out a board: left column in dataset order, right column in
    /// `right_order` (a permutation of the dataset indices).
    pub fn new(dataset: &Dataset, right_order: &[usize], config: EngineConfig) -> Result<Self> {
        if dataset.is_empty() {
            return Err(QuizError::Dataset(format!(
                "dataset '{}' has no items",
                dataset.id
            )));
        }
        if right_order.len() != dataset.len() {
            return Err(QuizError::Dataset(format!(
                "right column order has {} entries, dataset has {} items",
                right_order.len(),
                dataset.len()
            )));
        }
        let mut seen = vec![false; dataset.len()];
        for &idx in right_order {
            if idx >= dataset.len() || std::mem::replace(&mut seen[idx], true) {
                return Err(QuizError::Dataset(
                    "right column order is not a permutation".into(),
                ));
            }
        }

        let left = dataset
            .items
            .iter()
            .map(|item| Tile::new(item.id, Side::Left))
            .collect();
        let right = right_order
            .iter()
            .map(|&idx| Tile::new(dataset.items[idx].id, Side::Right))
            .collect();

        Ok(Self {
            left,
            right,
            selected_left: None,
            selected_right: None,
            stats: SessionStats::default(),
            total: dataset.len() as u32,
            completed: false,
            pending: Vec::new(),
            config,
            observer: Box::new(NoopObserver),
        })
    }

    /// Attach an observer that is told about every board change.
    pub fn with_observer(mut self, observer: Box<dyn BoardObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Select a tile.
    ///
    /// Due resets fire first, so a selection at `now` sees the board as it
    /// is at `now`. Selecting a matched tile is ignored. Selecting a tile
    /// replaces any earlier selection on the same side; once both sides hold
    /// a selection the pair is evaluated.
    pub fn select(&mut self, tile: TileRef, now: Instant) -> Result<SelectOutcome> {
        self.fire_due(now);

        let state = self
            .tile(tile)
            .map(|t| t.state)
            .ok_or_else(|| QuizError::unknown_tile(tile))?;
        if state == TileState::Matched {
            return Ok(SelectOutcome::Ignored);
        }

        let previous = self.selection_slot(tile.side).replace(tile.position);
        if let Some(prev) = previous.filter(|&p| p != tile.position) {
            self.set_state(TileRef::new(tile.side, prev), TileState::Idle);
        }
        self.set_state(tile, TileState::Selected);

        match (self.selected_left, self.selected_right) {
            (Some(l), Some(r)) => Ok(self.evaluate_pair(l, r, now)),
            _ => Ok(SelectOutcome::Selected),
        }
    }

    fn evaluate_pair(&mut self, l: usize, r: usize, now: Instant) -> SelectOutcome {
        self.selected_left = None;
        self.selected_right = None;
        self.stats.moves += 1;

        let left = TileRef::left(l);
        let right = TileRef::right(r);
        let left_id = self.left[l].item_id;

        if left_id == self.right[r].item_id {
            self.set_state(left, TileState::Matched);
            self.set_state(right, TileState::Matched);
            self.stats.matches += 1;
            self.observer.on_stats_changed(self.stats);
            tracing::debug!(item_id = left_id, moves = self.stats.moves, "pair matched");

            if self.stats.matches == self.total && !self.completed {
                self.completed = true;
                self.observer.on_complete(self.stats);
                tracing::debug!(moves = self.stats.moves, "board complete");
                return SelectOutcome::Completed { stats: self.stats };
            }
            return SelectOutcome::Matched { item_id: left_id };
        }

        let left_gen = self.mark_error(left);
        let right_gen = self.mark_error(right);
        let reset_at = now + self.config.mismatch_delay;
        self.pending.push(PendingReset {
            due: reset_at,
            tiles: [(left, left_gen), (right, right_gen)],
        });
        self.observer.on_stats_changed(self.stats);
        tracing::debug!(%left, %right, moves = self.stats.moves, "pair mismatched");

        SelectOutcome::Mismatched {
            left,
            right,
            reset_at,
        }
    }

    fn mark_error(&mut self, tile: TileRef) -> u64 {
        let t = self.tile_mut(tile);
        t.error_generation += 1;
        let generation = t.error_generation;
        self.set_state(tile, TileState::Error);
        generation
    }

    /// Fire every pending reset due at or before `now`.
    ///
    /// A tile goes back to idle only if it is still in the error state from
    /// the very mismatch that scheduled the reset and is not the current
    /// selection on its side. Returns the tiles that were reverted.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TileRef> {
        if self.pending.is_empty() {
            return Vec::new();
        }

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;
        due.sort_by_key(|p| p.due);

        let mut reverted = Vec::new();
        for reset in due {
            for (tile, generation) in reset.tiles {
                if self.is_still_pending(tile, generation) {
                    self.set_state(tile, TileState::Idle);
                    reverted.push(tile);
                } else {
                    tracing::trace!(%tile, "stale reset skipped");
                }
            }
        }
        reverted
    }

    fn is_still_pending(&self, tile: TileRef, generation: u64) -> bool {
        let t = match self.tile(tile) {
            Some(t) => t,
            None => return false,
        };
        t.state == TileState::Error
            && t.error_generation == generation
            && self.selection(tile.side) != Some(tile)
    }

    fn set_state(&mut self, tile: TileRef, state: TileState) {
        let t = self.tile_mut(tile);
        if t.state != state {
            t.state = state;
            self.observer.on_tile_changed(tile, state);
        }
    }

    fn selection_slot(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.selected_left,
            Side::Right => &mut self.selected_right,
        }
    }

    fn tile_mut(&mut self, tile: TileRef) -> &mut Tile {
        match tile.side {
            Side::Left => &mut self.left[tile.position],
            Side::Right => &mut self.right[tile.position],
        }
    }

    // -- read access ---------------------------------------------------------

    /// Tiles of one column in display order.
    pub fn tiles(&self, side: Side) -> &[Tile] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn tile(&self, tile: TileRef) -> Option<&Tile> {
        self.tiles(tile.side).get(tile.position)
    }

    /// Display position of an item's tile in a column.
    pub fn position_of(&self, side: Side, item_id: u32) -> Option<usize> {
        self.tiles(side).iter().position(|t| t.item_id == item_id)
    }

    /// The currently selected tile on a side, if any.
    pub fn selection(&self, side: Side) -> Option<TileRef> {
        let slot = match side {
            Side::Left => self.selected_left,
            Side::Right => self.selected_right,
        };
        slot.map(|p| TileRef::new(side, p))
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn total_items(&self) -> u32 {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// When the earliest pending reset is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|p| p.due).min()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
