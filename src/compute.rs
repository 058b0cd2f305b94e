/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Enemy, GameOverReport, GameState, Player, Pulse, Rect, Reward, Screen, Sprite, SpriteColor,
    Theme,
};

// ── Layout & tuning constants ─────────────────────────────────────────────────

pub const PLAYER_SIZE: i32 = 48;
pub const ENEMY_SIZE: i32 = 36;
pub const REWARD_SIZE: i32 = 28;
pub const LOGO_SIZE: i32 = 96;

/// Height of the HUD band the player may not enter.
pub const HUD_HEIGHT: i32 = 40;
pub const PLAYER_START_X: i32 = 50;

/// New entities appear this far past the right edge.
const SPAWN_MARGIN: i32 = 50;
const SPAWN_TOP: i32 = 50;
const ENEMY_ROW_PAD: i32 = 100;
const REWARD_ROW_PAD: i32 = 120;

pub const PULSE_STEP: f32 = 0.06;
pub const PULSE_MAX: f32 = 1.3;
pub const PULSE_MIN: f32 = 0.8;

pub const DEFAULT_PLAYER_NAME: &str = "Player";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the menu-screen state for a play field of `width` × `height` pixels.
pub fn init_state(rules: GameConfig, width: i32, height: i32) -> GameState {
    let lives = rules.starting_lives;
    let state = GameState {
        player: Player {
            sprite: Sprite::new(
                Rect::new(PLAYER_START_X, height / 2, PLAYER_SIZE, PLAYER_SIZE),
                SpriteColor::Orange,
            ),
        },
        enemies: Vec::new(),
        rewards: Vec::new(),
        logo: Sprite::pulsing(Rect::new(0, 0, LOGO_SIZE, LOGO_SIZE), SpriteColor::Cyan),
        score: 0,
        lives,
        screen: Screen::Menu,
        player_name: DEFAULT_PLAYER_NAME.to_string(),
        theme: Theme::Dark,
        width,
        height,
        frame: 0,
        rules,
    };
    resize(&state, width, height)
}

/// Trimmed player name, or the placeholder when nothing was typed.
pub fn player_name_or_default(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        name.to_string()
    }
}

// ── Screen transitions ───────────────────────────────────────────────────────

/// Menu → Playing.  Resets score, lives, entities and the player position.
pub fn start_game(state: &GameState, name: &str) -> GameState {
    if state.screen != Screen::Menu {
        return state.clone();
    }
    let player_name = player_name_or_default(name);
    log::info!("starting game for {}", player_name);

    let mut player = state.player.clone();
    player.sprite.bounds.x = PLAYER_START_X;
    player.sprite.bounds.y = state.height / 2;

    let next = GameState {
        player,
        enemies: Vec::new(),
        rewards: Vec::new(),
        score: 0,
        lives: state.rules.starting_lives,
        screen: Screen::Playing,
        player_name,
        frame: 0,
        ..state.clone()
    };
    clamp_player(&next)
}

/// Playing ⇄ Paused.  Any other screen is left alone.
pub fn toggle_pause(state: &GameState) -> GameState {
    let screen = match state.screen {
        Screen::Playing => Screen::Paused,
        Screen::Paused => Screen::Playing,
        other => other,
    };
    if screen != state.screen {
        log::debug!("{:?} -> {:?}", state.screen, screen);
    }
    GameState {
        screen,
        ..state.clone()
    }
}

/// Abandon the current game without a game-over report.
pub fn return_to_menu(state: &GameState) -> GameState {
    match state.screen {
        Screen::Playing | Screen::Paused => {
            log::info!("{} left the game with {} points", state.player_name, state.score);
            GameState {
                screen: Screen::Menu,
                ..state.clone()
            }
        }
        _ => state.clone(),
    }
}

/// Final score for the game-over dialog; `None` unless the game just ended.
pub fn game_over_report(state: &GameState) -> Option<GameOverReport> {
    if state.screen != Screen::GameOver {
        return None;
    }
    Some(GameOverReport {
        player_name: state.player_name.clone(),
        score: state.score,
    })
}

/// GameOver → Menu, once the dialog has been dismissed.
pub fn acknowledge_game_over(state: &GameState) -> GameState {
    if state.screen != Screen::GameOver {
        return state.clone();
    }
    GameState {
        screen: Screen::Menu,
        ..state.clone()
    }
}

pub fn toggle_theme(state: &GameState) -> GameState {
    let theme = match state.theme {
        Theme::Dark => Theme::Light,
        Theme::Light => Theme::Dark,
    };
    GameState {
        theme,
        ..state.clone()
    }
}

/// Adopt a new play-field size (terminal resize) and keep the player
/// and logo inside it.
pub fn resize(state: &GameState, width: i32, height: i32) -> GameState {
    let mut logo = state.logo.clone();
    logo.bounds.x = (width - LOGO_SIZE - PLAYER_START_X).max(0);
    logo.bounds.y = (height / 2 - LOGO_SIZE / 2).max(HUD_HEIGHT);
    let next = GameState {
        width,
        height,
        logo,
        ..state.clone()
    };
    clamp_player(&next)
}

// ── Input-driven movement ────────────────────────────────────────────────────

/// One key press worth of movement.
pub fn move_player(state: &GameState, direction: Direction) -> GameState {
    let step = state.rules.player_step;
    let (dx, dy) = match direction {
        Direction::Up => (0, -step),
        Direction::Down => (0, step),
        Direction::Left => (-step, 0),
        Direction::Right => (step, 0),
    };
    translate_player(state, dx, dy)
}

/// Shift the player by a delta, clamped to the field below the HUD band.
/// Ignored unless a game is running and unpaused.
pub fn translate_player(state: &GameState, dx: i32, dy: i32) -> GameState {
    if state.screen != Screen::Playing {
        return state.clone();
    }
    let mut next = state.clone();
    let b = &mut next.player.sprite.bounds;
    b.x = b.x.saturating_add(dx);
    b.y = b.y.saturating_add(dy);
    clamp_player(&next)
}

fn clamp_player(state: &GameState) -> GameState {
    let mut next = state.clone();
    let b = &mut next.player.sprite.bounds;
    let max_x = (state.width - b.w).max(0);
    let max_y = (state.height - b.h).max(HUD_HEIGHT);
    b.x = b.x.clamp(0, max_x);
    b.y = b.y.clamp(HUD_HEIGHT, max_y);
    next
}

// ── Per-tick simulation ──────────────────────────────────────────────────────

/// Advance the simulation by one update tick.
///
/// Enemies are processed before rewards, each collection oldest first.
/// Losing the last life ends the game immediately: enemies not yet visited
/// keep their positions and rewards are not checked this tick.
pub fn update(state: &GameState) -> GameState {
    if state.screen != Screen::Playing {
        return state.clone();
    }

    let rules = &state.rules;
    let player_box = state.player.sprite.bounds;
    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Enemies: move, collide, or leave the field ────────────────────────
    let mut survivors: Vec<Enemy> = Vec::with_capacity(state.enemies.len());
    let mut pending = state.enemies.iter();

    while let Some(enemy) = pending.next() {
        let mut enemy = enemy.clone();
        enemy.sprite.bounds.x = enemy.sprite.bounds.x.saturating_sub(enemy.speed);

        if enemy.sprite.bounds.intersects(&player_box) {
            next.lives = next.lives.saturating_sub(1);
            log::debug!("hit at {:?}, {} lives left", enemy.sprite.bounds, next.lives);
            if next.lives == 0 {
                survivors.extend(pending.by_ref().cloned());
                next.enemies = survivors;
                next.screen = Screen::GameOver;
                log::info!("game over for {} with {} points", next.player_name, next.score);
                return next;
            }
        } else if enemy.sprite.bounds.x < rules.offscreen_threshold {
            next.score = next.score.saturating_add(rules.enemy_bonus);
        } else {
            survivors.push(enemy);
        }
    }
    next.enemies = survivors;

    // ── 2. Rewards: collect on overlap ───────────────────────────────────────
    let (collected, remaining): (Vec<Reward>, Vec<Reward>) = state
        .rewards
        .iter()
        .cloned()
        .partition(|r| r.sprite.bounds.intersects(&player_box));

    let gained: u32 = collected.iter().map(|r| r.points).sum();
    next.score = next.score.saturating_add(gained);
    next.rewards = remaining;

    next
}

/// Spawn one enemy or one reward just past the right edge.  All randomness
/// comes through `rng` so callers control determinism.
pub fn spawn(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.screen != Screen::Playing {
        return state.clone();
    }

    let rules = &state.rules;
    let x = state.width + SPAWN_MARGIN;
    let mut next = state.clone();

    if rng.gen::<f64>() < rules.enemy_chance {
        let y = random_row(rng, state.height - ENEMY_ROW_PAD);
        log::trace!("enemy spawned at ({}, {})", x, y);
        next.enemies.push(Enemy {
            sprite: Sprite::new(Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE), SpriteColor::Red),
            speed: rules.enemy_speed,
        });
    } else {
        let y = random_row(rng, state.height - REWARD_ROW_PAD);
        log::trace!("reward spawned at ({}, {})", x, y);
        next.rewards.push(Reward {
            sprite: Sprite::pulsing(Rect::new(x, y, REWARD_SIZE, REWARD_SIZE), SpriteColor::Green),
            points: rules.reward_points,
        });
    }

    next
}

fn random_row(rng: &mut impl Rng, span: i32) -> i32 {
    SPAWN_TOP + (rng.gen::<f64>() * span.max(1) as f64) as i32
}

// ── Animation ────────────────────────────────────────────────────────────────

/// One animation step for every pulsing sprite, on every screen.
pub fn animate(state: &GameState) -> GameState {
    let mut next = state.clone();
    if let Some(p) = next.logo.pulse.as_mut() {
        step_pulse(p);
    }
    for reward in &mut next.rewards {
        if let Some(p) = reward.sprite.pulse.as_mut() {
            step_pulse(p);
        }
    }
    next
}

/// Bounce the scale between `PULSE_MIN` and `PULSE_MAX`.
pub fn step_pulse(pulse: &mut Pulse) {
    pulse.scale += if pulse.growing { PULSE_STEP } else { -PULSE_STEP };
    if pulse.scale > PULSE_MAX {
        pulse.growing = false;
    }
    if pulse.scale < PULSE_MIN {
        pulse.growing = true;
    }
}
