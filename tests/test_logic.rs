mod common;

use caw_space::adapters::SoundEffect;
use caw_space::entities::*;
use caw_space::logic::{GameLogic, FIRE_COOLDOWN_MS};
use caw_space::schedule::{Transition, GAME_OVER_DELAY_MS};
use caw_space::status::Phase;

use common::*;

// ── new_game ──────────────────────────────────────────────────────────────────

#[test]
fn new_game_resets_status_and_field() {
    let mut rng = seeded_rng();
    let mut logic = new_logic(&mut rng);
    let mut render = RecordingRender::new();

    let status = logic.status().clone();
    status.set_points(1234);
    status.set_level(4);
    status.set_asteroids_destroyed(17);
    status.set_enemy_ships_destroyed(3);
    status.set_new_boss_ship(true);
    let stray = Bullet::from_ship(logic.ship());
    logic.bullets_mut().push(stray);

    assert!(logic.new_game(0, &mut rng, &mut render));

    assert_eq!(status.phase(), Phase::Starting);
    assert_eq!(status.ships_left(), 3);
    assert_eq!(status.points(), 0);
    assert_eq!(status.level(), 1);
    assert_eq!(status.asteroids_destroyed(), 0);
    assert_eq!(status.enemy_ships_destroyed(), 0);
    assert_eq!(status.boss_ships_destroyed(), 0);
    assert!(!status.is_new_ship());
    for target in Target::ALL {
        assert!(!status.is_new(target));
    }
    assert!(logic.bullets().is_empty());
    assert_eq!(logic.ship().rect, Ship::spawn(CANVAS).rect);
    for target in Target::ALL {
        assert_eq!(logic.target_rect(target).y, 0);
    }
    assert_eq!(render.new_games, 1);
    assert_eq!(logic.sound().played(), vec![SoundEffect::GameTheme]);
    assert!(logic.scheduler().is_pending(Transition::BeginPlay));
}

#[test]
fn new_game_is_ignored_while_one_is_pending_or_running() {
    let mut rng = seeded_rng();
    let mut logic = new_logic(&mut rng);
    let mut render = RecordingRender::new();

    assert!(logic.new_game(0, &mut rng, &mut render));
    logic.status().add_points(100);
    assert!(!logic.new_game(100, &mut rng, &mut render));
    assert_eq!(logic.status().points(), 100);

    logic.run_due_transitions(PLAY_START);
    assert!(!logic.new_game(PLAY_START, &mut rng, &mut render));
    assert_eq!(render.new_games, 1);
}

#[test]
fn play_begins_after_the_start_delay() {
    let mut rng = seeded_rng();
    let mut logic = new_logic(&mut rng);
    let mut render = RecordingRender::new();
    logic.new_game(0, &mut rng, &mut render);

    logic.run_due_transitions(PLAY_START - 1);
    assert_eq!(logic.status().phase(), Phase::Starting);
    logic.run_due_transitions(PLAY_START);
    assert_eq!(logic.status().phase(), Phase::Playing);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn check_conditions_ends_the_game_exactly_once() {
    let mut rng = seeded_rng();
    let (mut logic, mut render) = playing_game(&mut rng);
    logic.status().set_ships_left(0);

    assert!(logic.check_conditions(2_000, &mut render));
    assert_eq!(logic.status().phase(), Phase::GameOver);
    assert!(!logic.check_conditions(2_010, &mut render));
    assert_eq!(render.game_overs, 1);

    logic.run_due_transitions(2_000 + GAME_OVER_DELAY_MS - 1);
    assert_eq!(logic.status().phase(), Phase::GameOver);
    logic.run_due_transitions(2_000 + GAME_OVER_DELAY_MS);
    assert_eq!(logic.status().phase(), Phase::NotStarted);

    // Title screen accepts a new game again.
    assert!(logic.new_game(6_000, &mut rng, &mut render));
}

#[test]
fn check_conditions_waits_for_play_to_begin() {
    let mut rng = seeded_rng();
    let mut logic = new_logic(&mut rng);
    let mut render = RecordingRender::new();
    logic.new_game(0, &mut rng, &mut render);
    logic.status().set_ships_left(0);
    assert!(!logic.check_conditions(10, &mut render));
    assert_eq!(logic.status().phase(), Phase::Starting);
}

#[test]
fn check_conditions_keeps_playing_with_ships_left() {
    let mut rng = seeded_rng();
    let (mut logic, mut render) = playing_game(&mut rng);
    assert!(!logic.check_conditions(2_000, &mut render));
    assert_eq!(logic.status().phase(), Phase::Playing);
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn fire_bullet_appends_in_fire_order() {
    let mut rng = seeded_rng();
    let (mut logic, _render) = playing_game(&mut rng);

    logic.fire_bullet();
    logic.move_ship(Direction::Left);
    logic.fire_bullet();

    let bullets = logic.bullets();
    assert_eq!(bullets.len(), 2);
    assert_eq!(bullets[0].rect.x, 245);
    assert_eq!(bullets[1].rect.x, 245 - Ship::DEFAULT_SPEED);
    assert_eq!(
        logic.sound().played(),
        vec![SoundEffect::BulletFired, SoundEffect::BulletFired]
    );
}

#[test]
fn request_fire_only_during_play_and_rate_limited() {
    let mut rng = seeded_rng();
    let mut logic = new_logic(&mut rng);
    let mut render = RecordingRender::new();

    assert!(!logic.request_fire(0));
    logic.new_game(0, &mut rng, &mut render);
    assert!(!logic.request_fire(100)); // still starting
    logic.run_due_transitions(PLAY_START);

    assert!(logic.request_fire(PLAY_START));
    assert!(!logic.request_fire(PLAY_START + FIRE_COOLDOWN_MS - 1));
    assert!(logic.request_fire(PLAY_START + FIRE_COOLDOWN_MS));
    assert_eq!(logic.bullets().len(), 2);

    logic.status().set_new_ship(true);
    assert!(!logic.request_fire(PLAY_START + 10 * FIRE_COOLDOWN_MS));
}

#[test]
fn move_bullet_steps_up_by_speed() {
    let mut bullet = Bullet {
        rect: Rect::new(100, 100, 8, 8),
        speed: 12,
    };
    assert!(!GameLogic::<RecordingSound>::move_bullet(&mut bullet));
    assert_eq!(bullet.rect.y, 88);
}

#[test]
fn move_bullet_reports_leaving_the_top() {
    let mut bullet = Bullet {
        rect: Rect::new(100, 12, 8, 8),
        speed: 12,
    };
    assert!(!GameLogic::<RecordingSound>::move_bullet(&mut bullet));
    assert_eq!(bullet.rect.y, 0);
    assert!(GameLogic::<RecordingSound>::move_bullet(&mut bullet));
    assert_eq!(bullet.rect.y, 0);
}

// ── Ship steering ─────────────────────────────────────────────────────────────

#[test]
fn move_ship_is_clamped_to_the_canvas() {
    let mut rng = seeded_rng();
    let (mut logic, _render) = playing_game(&mut rng);

    for _ in 0..200 {
        logic.move_ship(Direction::Left);
        logic.move_ship(Direction::Up);
    }
    assert_eq!((logic.ship().rect.x, logic.ship().rect.y), (0, 0));

    for _ in 0..200 {
        logic.move_ship(Direction::Right);
        logic.move_ship(Direction::Down);
    }
    assert_eq!(logic.ship().rect.x, CANVAS.width - Ship::WIDTH);
    assert_eq!(logic.ship().rect.y, CANVAS.height - Ship::HEIGHT - 1);
}

#[test]
fn respawning_ship_ignores_steering() {
    let mut rng = seeded_rng();
    let (mut logic, _render) = playing_game(&mut rng);
    logic.park_ship();
    logic.status().set_new_ship(true);
    let parked = logic.ship().rect;
    logic.move_ship(Direction::Left);
    assert_eq!(logic.ship().rect, parked);
    assert_eq!(parked, Rect::new(525, -25, 25, 25));
}

// ── Factories & parking ───────────────────────────────────────────────────────

#[test]
fn factories_replace_only_their_slot() {
    let mut rng = seeded_rng();
    let (mut logic, _render) = playing_game(&mut rng);
    let second = logic.asteroid(AsteroidSlot::Second).rect;

    let fresh = logic.new_asteroid(AsteroidSlot::First, &mut rng).rect;
    assert_eq!(fresh.y, 0);
    assert_eq!(logic.asteroid(AsteroidSlot::First).rect, fresh);
    assert_eq!(logic.asteroid(AsteroidSlot::Second).rect, second);

    let right = logic.new_enemy_ship(Lane::Right, &mut rng).rect;
    assert_eq!(logic.enemy_ship(Lane::Right).rect, right);
    assert_eq!(logic.enemy_ship(Lane::Left).rect, Rect::new(-25, -25, 25, 25));
}

#[test]
fn park_target_moves_above_top_left() {
    let mut rng = seeded_rng();
    let (mut logic, _render) = playing_game(&mut rng);
    place(&mut logic, Target::Boss, 100, 100);
    logic.park_target(Target::Boss);
    assert_eq!(logic.boss_ship().rect, Rect::new(-25, -25, 25, 25));
}

#[test]
fn boss_gating_by_level() {
    let mut rng = seeded_rng();
    let logic = new_logic(&mut rng);
    logic.status().set_level(1);
    assert!(logic.boss_active());

    let gated = new_logic(&mut rng).with_boss_every(Some(5));
    gated.status().set_level(4);
    assert!(!gated.boss_active());
    gated.status().set_level(5);
    assert!(gated.boss_active());
}

#[test]
fn every_target_has_its_own_rect() {
    let mut rng = seeded_rng();
    let (mut logic, _render) = playing_game(&mut rng);
    for (i, target) in Target::ALL.into_iter().enumerate() {
        place(&mut logic, target, 50 * i as i32, 100);
    }
    for (i, target) in Target::ALL.into_iter().enumerate() {
        assert_eq!(logic.target_rect(target).x, 50 * i as i32, "{target:?}");
    }
}
