//! One playthrough: rules, scoring, levels, countdown and the fixed-step tick.
//!
//! The session is driven from a single thread. The front-end calls
//! [`Session::advance`] once per frame and [`Session::handle`] for input; the
//! returned events go to the audio/HUD sinks.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

use crate::board::{Board, Layout};
use crate::clock::FixedStep;
use crate::collision::{self, Collision};
use crate::countdown::{Countdown, CountdownTick};
use crate::error::EngineError;
use crate::events::{Command, ResetCause, SessionEvent};
use crate::frame::Frame;
use crate::hud::HudState;
use crate::records::{RecordStore, Records};
use crate::rules::{Difficulty, Mode};
use crate::spawner::Spawner;
use crate::types::Position;

/// Board and population parameters that do not depend on difficulty
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub cols: i32,
    pub rows: i32,
    pub player_length: usize,
    pub agent_length: RangeInclusive<usize>,
    pub placement_attempts: usize,
    /// Used when the record store has no stored preference
    pub difficulty: Difficulty,
    pub mode: Mode,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            cols: 35,
            rows: 20,
            player_length: 4,
            agent_length: 3..=6,
            placement_attempts: 100_000,
            difficulty: Difficulty::Easy,
            mode: Mode::Survival,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh board or paused; the simulation does not step
    Idle,
    Playing,
}

pub struct Session {
    settings: SessionSettings,
    difficulty: Difficulty,
    mode: Mode,
    phase: Phase,
    score: u32,
    level: u32,
    muted: bool,
    records: Records,
    countdown: Countdown,
    step: FixedStep,
    spawner: Spawner,
    rng: StdRng,
    store: Box<dyn RecordStore>,
    pub board: Board,
}

impl Session {
    /// Build a session, taking difficulty/mode defaults from the record store
    pub fn new(settings: SessionSettings, mut store: Box<dyn RecordStore>) -> Result<Self, EngineError> {
        let records = match store.load() {
            Ok(Some(records)) => records,
            Ok(None) => Records {
                difficulty: settings.difficulty,
                mode: settings.mode,
                ..Records::default()
            },
            Err(err) => {
                warn!(%err, "could not read records, starting fresh");
                Records {
                    difficulty: settings.difficulty,
                    mode: settings.mode,
                    ..Records::default()
                }
            }
        };

        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let spawner = Spawner::new(settings.placement_attempts);
        let difficulty = records.difficulty;
        let mode = records.mode;
        let layout = Self::layout_for(&settings, difficulty, mode, 0);
        let board = Board::build(&layout, &spawner, &mut rng)?;

        info!(%difficulty, %mode, cols = settings.cols, rows = settings.rows, "session created");

        Ok(Session {
            difficulty,
            mode,
            phase: Phase::Idle,
            score: 0,
            level: 0,
            muted: false,
            records,
            countdown: Countdown::new(difficulty.countdown_secs()),
            step: FixedStep::per_second(difficulty.tick_rate()),
            spawner,
            rng,
            store,
            board,
            settings,
        })
    }

    fn layout_for(settings: &SessionSettings, difficulty: Difficulty, mode: Mode, level: u32) -> Layout {
        let foods = match mode {
            Mode::Survival => 1,
            Mode::Adventure => level as usize + 1,
        };
        Layout {
            cols: settings.cols,
            rows: settings.rows,
            stones: difficulty.stone_count(settings.cols, settings.rows),
            foods,
            agents: difficulty.agent_count(),
            player_length: settings.player_length,
            agent_length: settings.agent_length.clone(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Seconds between simulation steps
    pub fn step_interval(&self) -> f32 {
        self.step.interval()
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.board)
    }

    pub fn hud(&self) -> HudState {
        HudState {
            mode: self.mode,
            difficulty: self.difficulty,
            score: self.score,
            best_score: self.records.best_score,
            level: self.level,
            best_level: self.records.best_level,
            time_left: self.countdown.remaining(),
            playing: self.is_playing(),
            muted: self.muted,
        }
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.records) {
            warn!(%err, "could not save records");
        }
    }

    /// Compare the finished run against the best record of the current mode
    fn record_best(&mut self, events: &mut Vec<SessionEvent>) {
        if let Some((kind, value)) = self.records.offer(self.mode, self.score, self.level) {
            info!(?kind, value, "new best");
            self.persist();
            events.push(SessionEvent::NewBest { kind, value });
        }
    }

    /// Rebuild the board and every counter. Best records are settled first.
    pub fn reset(&mut self, cause: ResetCause) -> Result<Vec<SessionEvent>, EngineError> {
        let mut events = Vec::new();
        self.record_best(&mut events);

        self.phase = Phase::Idle;
        self.score = 0;
        self.level = 0;
        self.countdown.reset(self.difficulty.countdown_secs());
        self.step.set_rate(self.difficulty.tick_rate());
        self.step.restart();

        let layout = Self::layout_for(&self.settings, self.difficulty, self.mode, self.level);
        self.board = Board::build(&layout, &self.spawner, &mut self.rng)?;

        debug!(?cause, "session reset");
        events.push(SessionEvent::Reset { cause });
        Ok(events)
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command) -> Result<Vec<SessionEvent>, EngineError> {
        let mut events = Vec::new();
        match command {
            Command::Steer(direction) => {
                if self.mode == Mode::Adventure && !self.countdown.is_running() {
                    self.countdown.start();
                }
                self.board.player.steer(direction);
                if self.phase != Phase::Playing {
                    self.phase = Phase::Playing;
                    events.push(SessionEvent::Started);
                }
            }
            Command::Pause => {
                if self.phase == Phase::Playing {
                    self.phase = Phase::Idle;
                    self.countdown.cancel();
                    events.push(SessionEvent::Paused);
                }
            }
            Command::ToggleMute => {
                self.muted = !self.muted;
                events.push(SessionEvent::MuteToggled { muted: self.muted });
            }
            Command::ToggleFullscreen => events.push(SessionEvent::FullscreenToggled),
            Command::SetDifficulty(difficulty) => {
                events.extend(self.change_settings(difficulty, self.mode)?);
            }
            Command::SetMode(mode) => {
                events.extend(self.change_settings(self.difficulty, mode)?);
            }
        }
        Ok(events)
    }

    fn change_settings(&mut self, difficulty: Difficulty, mode: Mode) -> Result<Vec<SessionEvent>, EngineError> {
        let mut events = Vec::new();
        // the run being abandoned still counts for its own mode
        self.record_best(&mut events);

        self.difficulty = difficulty;
        self.mode = mode;
        self.records.difficulty = difficulty;
        self.records.mode = mode;
        self.persist();
        events.push(SessionEvent::SettingsChanged { difficulty, mode });
        events.extend(self.reset(ResetCause::Settings)?);
        Ok(events)
    }

    /// One fixed simulation step
    pub fn tick(&mut self) -> Result<Vec<SessionEvent>, EngineError> {
        if self.phase != Phase::Playing {
            if self.countdown.is_running() {
                self.countdown.cancel();
            }
            return Ok(Vec::new());
        }

        // Agents move before the player's hits are judged. A fatal hit
        // rebuilds the board, so their moves are never observed.
        self.board.advance_player();
        self.board.advance_agents(&mut self.rng);

        let hits = collision::resolve(&self.board);
        self.apply(&hits)
    }

    /// Fatal hits win: one reset, and any food eaten on the same step is
    /// dropped with the old board
    fn apply(&mut self, hits: &[Collision]) -> Result<Vec<SessionEvent>, EngineError> {
        if let Some(cause) = hits.iter().find_map(ResetCause::from_collision) {
            let mut events = vec![SessionEvent::GameOver { cause }];
            events.extend(self.reset(cause)?);
            return Ok(events);
        }

        let mut events = Vec::new();
        if let Some(&Collision::Food(pos)) = hits.iter().find(|h| matches!(h, Collision::Food(_))) {
            self.eat(pos, &mut events)?;
        }
        Ok(events)
    }

    fn eat(&mut self, pos: Position, events: &mut Vec<SessionEvent>) -> Result<(), EngineError> {
        match self.mode {
            Mode::Survival => {
                self.score += 1;
                self.board.foods = self.spawner.place_food(&self.board.grid, 1, &mut self.rng)?;
                events.push(SessionEvent::Scored { score: self.score });
            }
            Mode::Adventure => {
                self.board.remove_food(pos);
                if self.board.foods.is_empty() {
                    let next = self.level as usize + 2;
                    self.board.foods = self.spawner.place_food(&self.board.grid, next, &mut self.rng)?;
                    self.countdown.cancel();
                    self.level += 1;
                    self.countdown.restart();
                    info!(level = self.level, "level cleared");
                    events.push(SessionEvent::LevelUp { level: self.level });
                } else {
                    events.push(SessionEvent::FoodEaten {
                        remaining: self.board.foods.len(),
                    });
                }
            }
        }
        self.board.player.grow();
        Ok(())
    }

    /// One countdown second. Expiry resets the session exactly once.
    pub fn countdown_tick(&mut self) -> Result<Vec<SessionEvent>, EngineError> {
        let outcome = self.countdown.tick();
        self.countdown_outcome(outcome)
    }

    fn countdown_outcome(&mut self, outcome: CountdownTick) -> Result<Vec<SessionEvent>, EngineError> {
        match outcome {
            CountdownTick::Idle => Ok(Vec::new()),
            CountdownTick::Remaining(remaining) => Ok(vec![SessionEvent::CountdownTick { remaining }]),
            CountdownTick::Expired => {
                let mut events = vec![SessionEvent::GameOver {
                    cause: ResetCause::TimeUp,
                }];
                events.extend(self.reset(ResetCause::TimeUp)?);
                Ok(events)
            }
        }
    }

    /// Feed one frame's delta time (seconds): steps the simulation when due,
    /// then the countdown
    pub fn advance(&mut self, delta_time: f32) -> Result<Vec<SessionEvent>, EngineError> {
        let mut events = Vec::new();
        if self.step.advance(delta_time) {
            events.extend(self.tick()?);
        }
        let outcome = self.countdown.advance(delta_time);
        events.extend(self.countdown_outcome(outcome)?);
        Ok(events)
    }
}
