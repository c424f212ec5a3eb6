//! Session controller.
//!
//! Screen transitions around the engine: start, quiz (with a pause overlay),
//! result and history. Everything about matching and scoring is delegated.

use std::rc::Rc;
use std::time::Instant;

use serde::Serialize;

use crate::config::PeakmatchConfig;
use crate::engine::{BoardObserver, EngineConfig, MatchingEngine, SelectOutcome};
use crate::error::{QuizError, Result};
use crate::history::{HistoryRow, HistoryStore};
use crate::model::{Dataset, TileRef};
use crate::scoring::{self, ScoreTier};
use crate::shuffle;
use crate::traits::KeyValueStore;

/// Which screen the front end should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Quiz,
    Result,
    History,
}

/// Outcome of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub user_name: String,
    pub score: u32,
    pub tier: ScoreTier,
    pub moves: u32,
}

impl QuizResult {
    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

/// Drives one player through quizzes and keeps the history up to date.
pub struct SessionController<S: KeyValueStore> {
    dataset: Dataset,
    history: HistoryStore<S>,
    engine_config: EngineConfig,
    rng: fastrand::Rng,
    screen: Screen,
    paused: bool,
    user_name: Option<String>,
    engine: Option<MatchingEngine>,
    last_result: Option<QuizResult>,
    observer: Option<Rc<dyn BoardObserver>>,
}

impl<S: KeyValueStore> SessionController<S> {
    /// `seed` makes the sequence of boards reproducible; each new quiz still
    /// gets its own shuffle.
    pub fn new(
        dataset: Dataset,
        history: HistoryStore<S>,
        engine_config: EngineConfig,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            dataset,
            history,
            engine_config,
            rng,
            screen: Screen::Start,
            paused: false,
            user_name: None,
            engine: None,
            last_result: None,
            observer: None,
        }
    }

    pub fn from_config(
        dataset: Dataset,
        history: HistoryStore<S>,
        config: &PeakmatchConfig,
    ) -> Self {
        Self::new(dataset, history, config.engine_config(), config.seed)
    }

    /// Attach `observer` to the board of every quiz started from now on.
    pub fn with_observer(mut self, observer: Rc<dyn BoardObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Start a fresh quiz for `name`.
    ///
    /// A blank name is rejected and nothing changes.
    pub fn start(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::MissingUserName);
        }

        let order = shuffle::shuffled(self.dataset.len(), &mut self.rng);
        let mut engine = MatchingEngine::new(&self.dataset, &order, self.engine_config.clone())?;
        if let Some(observer) = &self.observer {
            engine = engine.with_observer(Box::new(Rc::clone(observer)));
        }

        tracing::info!(user = name, dataset = %self.dataset.id, "quiz started");
        self.user_name = Some(name.to_string());
        self.engine = Some(engine);
        self.last_result = None;
        self.paused = false;
        self.screen = Screen::Quiz;
        Ok(())
    }

    /// Start another quiz for the current player.
    pub fn restart(&mut self) -> Result<()> {
        let name = self.user_name.clone().ok_or(QuizError::MissingUserName)?;
        self.start(&name)
    }

    /// Select a tile on the running quiz.
    ///
    /// When the selection completes the board the result is scored, recorded
    /// and the controller moves to [`Screen::Result`].
    pub fn select(&mut self, tile: TileRef, now: Instant) -> Result<SelectOutcome> {
        if self.screen != Screen::Quiz {
            return Err(QuizError::NotPlaying);
        }
        if self.paused {
            return Err(QuizError::Paused);
        }
        let engine = self.engine.as_mut().ok_or(QuizError::NotPlaying)?;

        let outcome = engine.select(tile, now)?;
        if let SelectOutcome::Completed { .. } = outcome {
            self.finish()?;
        }
        Ok(outcome)
    }

    /// Let due mismatch resets fire. Returns the tiles that went back to idle.
    pub fn tick(&mut self, now: Instant) -> Vec<TileRef> {
        match self.engine.as_mut() {
            Some(engine) => engine.fire_due(now),
            None => Vec::new(),
        }
    }

    fn finish(&mut self) -> Result<()> {
        let (Some(engine), Some(user_name)) = (self.engine.as_ref(), self.user_name.as_ref())
        else {
            return Err(QuizError::NotPlaying);
        };

        let stats = engine.stats();
        let score = scoring::score(stats.moves, engine.total_items());
        let result = QuizResult {
            user_name: user_name.clone(),
            score,
            tier: ScoreTier::for_score(score),
            moves: stats.moves,
        };

        self.screen = Screen::Result;
        self.last_result = Some(result);
        self.history.record_session(user_name, score, stats.moves)?;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        if self.screen != Screen::Quiz {
            return Err(QuizError::NotPlaying);
        }
        self.paused = true;
        Ok(())
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Abandon the running quiz. Nothing is recorded. Returns `false` (and
    /// does nothing) unless the player confirmed.
    pub fn exit(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        if self.engine.take().is_some() {
            tracing::info!("quiz abandoned");
        }
        self.paused = false;
        self.screen = Screen::Start;
        true
    }

    /// Switch to the history screen and return its rows.
    pub fn show_history(&mut self) -> Vec<HistoryRow> {
        self.screen = Screen::History;
        self.history.rows()
    }

    pub fn go_home(&mut self) {
        self.screen = Screen::Start;
    }

    /// Wipe the history. Returns `Ok(false)` unless the player confirmed.
    pub fn clear_history(&mut self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.history.clear_all()?;
        Ok(true)
    }

    // -- read access ---------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The board of the current (or just finished) quiz.
    pub fn engine(&self) -> Option<&MatchingEngine> {
        self.engine.as_ref()
    }

    pub fn last_result(&self) -> Option<&QuizResult> {
        self.last_result.as_ref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }
}
