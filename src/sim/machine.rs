//! Session state machine
//!
//! Idle -> Running -> Won | Lost, and back to Running only through `start`.
//! The session owns the level, the simulation state and the RNG used for
//! completion codes; nothing else mutates them.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::SimulationState;
use super::tick::{StepOutcome, Terminal, TickInput, step};
use super::view::FrameView;
use crate::consts::{CODE_ALPHABET, CODE_LENGTH};
use crate::level::Level;
use crate::tuning::Tuning;

/// Why a run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Fell,
    HitEnemy,
    HitHazard,
    HitPit,
}

/// Current phase of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start, or after a result was dismissed
    Idle,
    /// One step per frame
    Running,
    /// Reached the club door
    Won { code: String },
    /// Any lethal terminal
    Lost { cause: LossCause },
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won { .. } | GamePhase::Lost { .. })
    }
}

/// What the surrounding UI shows once a run ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    Won {
        score: u32,
        code: String,
    },
    Lost {
        score: u32,
        cause: LossCause,
        /// Display only; collecting everything does not win
        collected_all: bool,
    },
}

/// Generate a completion code: `CODE_LENGTH` symbols drawn uniformly from A-Z0-9
pub fn completion_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// One player's play-through state
#[derive(Debug, Clone)]
pub struct Session<R: RngCore = Pcg32> {
    level: Level,
    tuning: Tuning,
    phase: GamePhase,
    state: SimulationState,
    rng: R,
}

impl Session<Pcg32> {
    /// Create an idle session whose completion codes come from `seed`
    pub fn new(level: Level, tuning: Tuning, seed: u64) -> Self {
        Self::with_rng(level, tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: RngCore> Session<R> {
    /// Create an idle session with a caller-supplied randomness source
    pub fn with_rng(level: Level, tuning: Tuning, rng: R) -> Self {
        let state = SimulationState::new(&level);
        Self {
            level,
            tuning,
            phase: GamePhase::Idle,
            state,
            rng,
        }
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Start (or restart) a run from the level's initial layout
    ///
    /// Valid from every phase. Player, enemies, coins, camera and score all
    /// return to their initial values. Fire animation phases restart at zero
    /// as well; they are visual only, so a restarted run plays identically.
    pub fn start(&mut self) {
        self.state = SimulationState::new(&self.level);
        self.phase = GamePhase::Running;
        log::info!("Session started on '{}'", self.level.name);
    }

    /// Close a result screen and go back to idle. Returns false if there was
    /// no result to dismiss.
    pub fn dismiss(&mut self) -> bool {
        if self.phase.is_terminal() {
            self.phase = GamePhase::Idle;
            true
        } else {
            false
        }
    }

    /// Run one simulation step if running; `None` means the step was refused
    pub fn advance(&mut self, input: &TickInput) -> Option<StepOutcome> {
        if !self.is_running() {
            return None;
        }

        let outcome = step(&mut self.state, &self.level, input, &self.tuning);

        if let Some(terminal) = outcome.terminal {
            self.finish(terminal);
        }

        Some(outcome)
    }

    fn finish(&mut self, terminal: Terminal) {
        let cause = match terminal {
            Terminal::ReachedGoal => {
                let code = completion_code(&mut self.rng);
                log::info!(
                    "Level complete after {} frames: score {}, code {}",
                    self.state.time_ticks,
                    self.state.score,
                    code
                );
                self.phase = GamePhase::Won { code };
                return;
            }
            Terminal::Fell => LossCause::Fell,
            Terminal::HitEnemy => LossCause::HitEnemy,
            Terminal::HitHazard => LossCause::HitHazard,
            Terminal::HitPit => LossCause::HitPit,
        };

        log::info!(
            "Game over after {} frames: {:?}, score {}",
            self.state.time_ticks,
            cause,
            self.state.score
        );
        self.phase = GamePhase::Lost { cause };
    }

    /// Final result while a Won/Lost screen is showing
    pub fn result(&self) -> Option<SessionResult> {
        match &self.phase {
            GamePhase::Won { code } => Some(SessionResult::Won {
                score: self.state.score,
                code: code.clone(),
            }),
            GamePhase::Lost { cause } => Some(SessionResult::Lost {
                score: self.state.score,
                cause: *cause,
                collected_all: self.state.all_collected(),
            }),
            GamePhase::Idle | GamePhase::Running => None,
        }
    }

    /// Read-only snapshot for drawing the current frame
    pub fn view(&self) -> FrameView<'_> {
        FrameView::new(&self.state, &self.level)
    }
}
