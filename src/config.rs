/// Tunable game rules, optionally loaded from a TOML file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "dodge_game.toml";
const CONFIG_ENV_VAR: &str = "DODGE_GAME_CONFIG";

/// Per-tick distances beyond this make no sense on any terminal.
const MAX_STEP: i32 = 1_000;
const MIN_OFFSCREEN_THRESHOLD: i32 = -10_000;

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Update tick period (one frame of the shell loop).
    pub tick_ms: u64,
    pub spawn_ms: u64,
    pub pulse_ms: u64,
    pub starting_lives: u32,
    pub enemy_speed: i32,
    /// Probability that a spawn produces an enemy rather than a reward.
    pub enemy_chance: f64,
    /// Score for every enemy that leaves the field on the left.
    pub enemy_bonus: u32,
    pub reward_points: u32,
    pub offscreen_threshold: i32,
    pub player_step: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 20,
            spawn_ms: 600,
            pulse_ms: 120,
            starting_lives: 3,
            enemy_speed: 4,
            enemy_chance: 0.7,
            enemy_bonus: 5,
            reward_points: 10,
            offscreen_threshold: -100,
            player_step: 8,
        }
    }
}

impl GameConfig {
    /// Clamp values that would stall the timers or break the rules.
    pub fn sanitized(mut self) -> Self {
        self.tick_ms = self.tick_ms.max(1);
        self.spawn_ms = self.spawn_ms.max(self.tick_ms);
        self.pulse_ms = self.pulse_ms.max(self.tick_ms);
        self.starting_lives = self.starting_lives.max(1);
        self.enemy_speed = self.enemy_speed.clamp(1, MAX_STEP);
        self.player_step = self.player_step.clamp(1, MAX_STEP);
        self.offscreen_threshold = self
            .offscreen_threshold
            .clamp(MIN_OFFSCREEN_THRESHOLD, 0);
        self.enemy_chance = if self.enemy_chance.is_nan() {
            Self::default().enemy_chance
        } else {
            self.enemy_chance.clamp(0.0, 1.0)
        };
        self
    }

    /// Number of update frames between spawns.
    pub fn spawn_every(&self) -> u32 {
        frames_for(self.spawn_ms, self.tick_ms)
    }

    /// Number of update frames between animation steps.
    pub fn pulse_every(&self) -> u32 {
        frames_for(self.pulse_ms, self.tick_ms)
    }
}

fn frames_for(period_ms: u64, tick_ms: u64) -> u32 {
    (period_ms / tick_ms.max(1)).clamp(1, u32::MAX as u64) as u32
}

pub fn config_path() -> PathBuf {
    env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Parse a config document; missing keys keep their defaults.
pub fn parse_config(content: &str) -> Result<GameConfig, toml::de::Error> {
    toml::from_str::<GameConfig>(content).map(GameConfig::sanitized)
}

/// Load the config file, falling back to defaults when it is absent or bad.
pub fn load_config() -> GameConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> GameConfig {
    match fs::read_to_string(path) {
        Ok(content) => match parse_config(&content) {
            Ok(cfg) => {
                log::info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", path.display(), e);
                GameConfig::default()
            }
        },
        Err(_) => {
            log::debug!("no config at {}, using defaults", path.display());
            GameConfig::default()
        }
    }
}
