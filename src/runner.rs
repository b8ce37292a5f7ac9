//! Frame-driven tick source
//!
//! The host calls `Game::frame` once per animation frame. At most one
//! simulation step runs per call, synchronously. Leaving `Running` cancels
//! the tick source immediately; nothing steps again until the next `start`.

use crate::input::KeyTracker;
use crate::sim::{FrameView, GamePhase, Session, SessionResult, StepOutcome, TickInput};

/// Arms and disarms per-frame stepping
#[derive(Debug, Clone, Default)]
pub struct TickSource {
    armed: bool,
    /// Steps fired since the last `arm`
    fired: u64,
}

impl TickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) {
        self.armed = true;
        self.fired = 0;
    }

    /// Stop firing. Safe to call any number of times.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Consume one frame's tick; false when cancelled
    fn fire(&mut self) -> bool {
        if self.armed {
            self.fired += 1;
        }
        self.armed
    }
}

/// Where the next frame's input comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Keyboard state from `Game::keys_mut`
    #[default]
    Keyboard,
    /// Demo player
    Autopilot,
}

/// Session plus the frame loop around it
#[derive(Debug, Clone)]
pub struct Game {
    session: Session,
    keys: KeyTracker,
    ticker: TickSource,
    source: InputSource,
}

impl Game {
    pub fn new(session: Session, source: InputSource) -> Self {
        Self {
            session,
            keys: KeyTracker::new(),
            ticker: TickSource::new(),
            source,
        }
    }

    /// Explicit start command: reset the session and arm the tick source
    pub fn start(&mut self) {
        self.session.start();
        self.ticker.arm();
    }

    /// Stop stepping without changing the session phase
    pub fn cancel(&mut self) {
        self.ticker.cancel();
    }

    /// Close the result screen
    pub fn dismiss(&mut self) -> bool {
        self.ticker.cancel();
        self.session.dismiss()
    }

    /// Drive one animation frame. Returns the step outcome if a step ran.
    pub fn frame(&mut self) -> Option<StepOutcome> {
        if !self.ticker.fire() {
            return None;
        }

        let input = self.next_input();
        let outcome = self.session.advance(&input);

        if !self.session.is_running() {
            self.ticker.cancel();
        }

        outcome
    }

    fn next_input(&self) -> TickInput {
        match self.source {
            InputSource::Keyboard => self.keys.snapshot(),
            InputSource::Autopilot => {
                crate::input::autopilot(self.session.state(), self.session.level())
            }
        }
    }

    pub fn keys_mut(&mut self) -> &mut KeyTracker {
        &mut self.keys
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> &GamePhase {
        self.session.phase()
    }

    pub fn ticker(&self) -> &TickSource {
        &self.ticker
    }

    pub fn view(&self) -> FrameView<'_> {
        self.session.view()
    }

    pub fn result(&self) -> Option<SessionResult> {
        self.session.result()
    }
}
