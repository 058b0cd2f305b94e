/// Frame-counted periodic timers.
///
/// The shell loop runs one frame per update period, so every timer is
/// expressed as "fire every N frames".  Everything runs on the loop's own
/// thread; a timer callback can never overlap another one.

use rand::Rng;

use crate::compute::{animate, spawn, update};
use crate::config::GameConfig;
use crate::entities::{GameState, Screen};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timer {
    period: u32,
    elapsed: u32,
    running: bool,
}

impl Timer {
    /// A stopped timer firing every `period` frames (at least 1).
    pub fn every(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
            running: false,
        }
    }

    /// Start counting from zero; a running timer keeps its phase.
    pub fn start(&mut self) {
        if !self.running {
            self.elapsed = 0;
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    /// Count one frame; returns `true` when the timer fires.
    pub fn advance(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// The three periodic callbacks of the game: fast update, slow spawn and
/// the sprite animation.
#[derive(Clone, Debug)]
pub struct Clock {
    pub update: Timer,
    pub spawn: Timer,
    pub pulse: Timer,
}

impl Clock {
    /// Game timers start stopped; the animation timer always runs.
    pub fn new(rules: &GameConfig) -> Self {
        let mut pulse = Timer::every(rules.pulse_every());
        pulse.start();
        Self {
            update: Timer::every(1),
            spawn: Timer::every(rules.spawn_every()),
            pulse,
        }
    }

    pub fn start_game_timers(&mut self) {
        self.update.start();
        self.spawn.start();
    }

    pub fn stop_game_timers(&mut self) {
        self.update.stop();
        self.spawn.stop();
    }

    pub fn game_timers_running(&self) -> bool {
        self.update.is_running() && self.spawn.is_running()
    }

    /// Run one frame: fire whichever timers are due, in update → spawn →
    /// animate order.  Ending the game stops the game timers.
    pub fn step(&mut self, state: &GameState, rng: &mut impl Rng) -> GameState {
        let mut next = state.clone();

        if self.update.advance() {
            next = update(&next);
        }
        if self.spawn.advance() {
            next = spawn(&next, rng);
        }
        if self.pulse.advance() {
            next = animate(&next);
        }

        if next.screen == Screen::GameOver && self.game_timers_running() {
            self.stop_game_timers();
            log::debug!("game timers stopped after {} ticks", next.frame);
        }
        next
    }
}
