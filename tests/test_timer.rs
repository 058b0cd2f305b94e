use dodge_game::compute::*;
use dodge_game::config::GameConfig;
use dodge_game::entities::*;
use dodge_game::timer::{Clock, Timer};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn stopped_timer_never_fires() {
    let mut t = Timer::every(3);
    assert!(!t.is_running());
    assert!((0..10).all(|_| !t.advance()));
}

#[test]
fn timer_fires_every_period() {
    let mut t = Timer::every(3);
    t.start();
    let fired: Vec<bool> = (0..7).map(|_| t.advance()).collect();
    assert_eq!(fired, vec![false, false, true, false, false, true, false]);
}

#[test]
fn zero_period_is_every_frame() {
    let mut t = Timer::every(0);
    t.start();
    assert_eq!(t.period(), 1);
    assert!(t.advance() && t.advance());
}

#[test]
fn restart_resets_phase() {
    let mut t = Timer::every(3);
    t.start();
    t.advance();
    t.advance();
    t.stop();
    t.start();
    assert!(!t.advance());
    assert!(!t.advance());
    assert!(t.advance());
}

#[test]
fn clock_only_animates_on_menu() {
    let rules = GameConfig::default();
    let mut clock = Clock::new(&rules);
    let mut rng = seeded_rng();
    let mut s = init_state(rules, 640, 384);

    // Eight animation steps
    for _ in 0..48 {
        s = clock.step(&s, &mut rng);
    }
    assert!(!clock.game_timers_running());
    assert!(s.enemies.is_empty() && s.rewards.is_empty());
    assert_ne!(s.logo.scale(), 1.0);
}

#[test]
fn clock_spawns_every_thirty_frames() {
    let rules = GameConfig::default();
    let mut clock = Clock::new(&rules);
    let mut rng = seeded_rng();
    let mut s = start_game(&init_state(rules, 640, 384), "Clock");
    // Park the player in a corner no spawn row can reach quickly.
    s.player.sprite.bounds.y = 384 - PLAYER_SIZE;
    s.player.sprite.bounds.x = 0;
    clock.start_game_timers();

    for _ in 0..29 {
        s = clock.step(&s, &mut rng);
    }
    assert_eq!(s.enemies.len() + s.rewards.len(), 0);
    s = clock.step(&s, &mut rng);
    assert_eq!(s.enemies.len() + s.rewards.len(), 1);
    assert_eq!(s.frame, 30);
}

#[test]
fn paused_game_keeps_timers_but_not_state() {
    let rules = GameConfig::default();
    let mut clock = Clock::new(&rules);
    let mut rng = seeded_rng();
    let s = start_game(&init_state(rules, 640, 384), "Pause");
    clock.start_game_timers();

    let mut paused = toggle_pause(&s);
    for _ in 0..90 {
        paused = clock.step(&paused, &mut rng);
    }
    assert!(clock.game_timers_running());
    assert_eq!(paused.frame, 0);
    assert!(paused.enemies.is_empty() && paused.rewards.is_empty());

    let resumed = clock.step(&toggle_pause(&paused), &mut rng);
    assert_eq!(resumed.frame, 1);
}

#[test]
fn game_over_stops_ticks_and_reports_score() {
    let rules = GameConfig::default();
    let mut clock = Clock::new(&rules);
    let mut rng = seeded_rng();
    let mut s = start_game(&init_state(rules, 640, 384), "Doomed");
    clock.start_game_timers();

    s.score = 15;
    s.lives = 1;
    let p = s.player.sprite.bounds;
    s.enemies.push(Enemy {
        sprite: Sprite::new(Rect::new(p.x + 4, p.y, ENEMY_SIZE, ENEMY_SIZE), SpriteColor::Red),
        speed: 4,
    });

    s = clock.step(&s, &mut rng);
    assert_eq!(s.screen, Screen::GameOver);
    assert_eq!(s.lives, 0);
    assert!(!clock.game_timers_running());

    let frame = s.frame;
    for _ in 0..100 {
        s = clock.step(&s, &mut rng);
    }
    assert_eq!(s.frame, frame);
    assert_eq!(game_over_report(&s).map(|r| r.score), Some(15));
}
