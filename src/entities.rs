/// All game entity types — pure data, no rendering.

use crate::config::GameConfig;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box in virtual pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test: boxes that only share an edge do not intersect,
    /// and an empty box never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }
}

// ── Sprites ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteColor {
    Orange,
    Red,
    Green,
    Cyan,
}

/// Oscillating draw scale for decorative sprites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pulse {
    pub scale: f32,
    pub growing: bool,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            scale: 1.0,
            growing: true,
        }
    }
}

/// A drawable box.  `bounds` is what collides; `pulse` only changes how
/// big the renderer draws it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub bounds: Rect,
    pub color: SpriteColor,
    pub pulse: Option<Pulse>,
}

impl Sprite {
    pub fn new(bounds: Rect, color: SpriteColor) -> Self {
        Self {
            bounds,
            color,
            pulse: None,
        }
    }

    pub fn pulsing(bounds: Rect, color: SpriteColor) -> Self {
        Self {
            bounds,
            color,
            pulse: Some(Pulse::default()),
        }
    }

    /// Current draw scale (1.0 for static sprites).
    pub fn scale(&self) -> f32 {
        self.pulse.map(|p| p.scale).unwrap_or(1.0)
    }
}

// ── Player, enemies, rewards ──────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub sprite: Sprite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub sprite: Sprite,
    /// Pixels moved leftwards per update tick.
    pub speed: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reward {
    pub sprite: Sprite,
    pub points: u32,
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// What the game-over dialog shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOverReport {
    pub player_name: String,
    pub score: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
///
/// Owned by the frame loop alone; nothing here is shared across threads.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Oldest spawned first.
    pub enemies: Vec<Enemy>,
    /// Oldest spawned first.
    pub rewards: Vec<Reward>,
    /// Pulsing logo shown on the menu screen.
    pub logo: Sprite,
    pub score: u32,
    pub lives: u32,
    pub screen: Screen,
    pub player_name: String,
    pub theme: Theme,
    /// Play-field size in virtual pixels.
    pub width: i32,
    pub height: i32,
    /// Update ticks processed since the current game started.
    pub frame: u64,
    pub rules: GameConfig,
}
