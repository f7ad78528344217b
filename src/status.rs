/// Shared game status: phase flags, respawn flags and score counters.
///
/// Every field is its own atomic, so the tick loop and any other thread holding
/// the `Arc<GameStatus>` can read and write without a lock.  No compound
/// invariant is enforced here; callers keep related fields consistent.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU64, Ordering};

use crate::entities::{AsteroidSlot, Lane, Target};

pub const INITIAL_SHIPS: i32 = 3;
pub const INITIAL_LEVEL: u32 = 1;
/// A new level is reached every time this many asteroids have been destroyed.
pub const ASTEROIDS_PER_LEVEL: u64 = 5;

const ORD: Ordering = Ordering::SeqCst;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Starting,
    Playing,
    GameOver,
}

/// Plain copy of the status, taken at a tick boundary for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub phase: Phase,
    pub ships_left: i32,
    pub points: u32,
    pub level: u32,
    pub asteroids_destroyed: u64,
    pub enemy_ships_destroyed: u64,
    pub boss_ships_destroyed: u64,
}

#[derive(Debug, Default)]
pub struct GameStatus {
    game_starting: AtomicBool,
    game_started: AtomicBool,
    game_over: AtomicBool,

    new_ship: AtomicBool,
    new_asteroid: AtomicBool,
    new_second_asteroid: AtomicBool,
    new_enemy_ship: AtomicBool,
    new_second_enemy_ship: AtomicBool,
    new_boss_ship: AtomicBool,

    ships_left: AtomicI32,
    points: AtomicU32,
    level: AtomicU32,
    asteroids_destroyed: AtomicU64,
    enemy_ships_destroyed: AtomicU64,
    boss_ships_destroyed: AtomicU64,
}

impl GameStatus {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Phase flags ──────────────────────────────────────────────────────────

    pub fn is_game_starting(&self) -> bool {
        self.game_starting.load(ORD)
    }
    pub fn set_game_starting(&self, value: bool) {
        self.game_starting.store(value, ORD);
    }

    pub fn is_game_started(&self) -> bool {
        self.game_started.load(ORD)
    }
    pub fn set_game_started(&self, value: bool) {
        self.game_started.store(value, ORD);
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.load(ORD)
    }
    pub fn set_game_over(&self, value: bool) {
        self.game_over.store(value, ORD);
    }

    pub fn phase(&self) -> Phase {
        if self.is_game_starting() {
            Phase::Starting
        } else if self.is_game_started() {
            Phase::Playing
        } else if self.is_game_over() {
            Phase::GameOver
        } else {
            Phase::NotStarted
        }
    }

    // ── Respawn flags ────────────────────────────────────────────────────────

    pub fn is_new_ship(&self) -> bool {
        self.new_ship.load(ORD)
    }
    pub fn set_new_ship(&self, value: bool) {
        self.new_ship.store(value, ORD);
    }

    pub fn is_new_asteroid(&self) -> bool {
        self.new_asteroid.load(ORD)
    }
    pub fn set_new_asteroid(&self, value: bool) {
        self.new_asteroid.store(value, ORD);
    }

    pub fn is_new_second_asteroid(&self) -> bool {
        self.new_second_asteroid.load(ORD)
    }
    pub fn set_new_second_asteroid(&self, value: bool) {
        self.new_second_asteroid.store(value, ORD);
    }

    pub fn is_new_enemy_ship(&self) -> bool {
        self.new_enemy_ship.load(ORD)
    }
    pub fn set_new_enemy_ship(&self, value: bool) {
        self.new_enemy_ship.store(value, ORD);
    }

    pub fn is_new_second_enemy_ship(&self) -> bool {
        self.new_second_enemy_ship.load(ORD)
    }
    pub fn set_new_second_enemy_ship(&self, value: bool) {
        self.new_second_enemy_ship.store(value, ORD);
    }

    pub fn is_new_boss_ship(&self) -> bool {
        self.new_boss_ship.load(ORD)
    }
    pub fn set_new_boss_ship(&self, value: bool) {
        self.new_boss_ship.store(value, ORD);
    }

    fn flag_for(&self, target: Target) -> &AtomicBool {
        match target {
            Target::Asteroid(AsteroidSlot::First) => &self.new_asteroid,
            Target::Asteroid(AsteroidSlot::Second) => &self.new_second_asteroid,
            Target::Enemy(Lane::Left) => &self.new_enemy_ship,
            Target::Enemy(Lane::Right) => &self.new_second_enemy_ship,
            Target::Boss => &self.new_boss_ship,
        }
    }

    /// Whether `target` is destroyed and waiting out its respawn window.
    pub fn is_new(&self, target: Target) -> bool {
        self.flag_for(target).load(ORD)
    }

    pub fn set_new(&self, target: Target, value: bool) {
        self.flag_for(target).store(value, ORD);
    }

    // ── Counters ─────────────────────────────────────────────────────────────

    pub fn ships_left(&self) -> i32 {
        self.ships_left.load(ORD)
    }
    /// Stored as given, negative values included.
    pub fn set_ships_left(&self, value: i32) {
        self.ships_left.store(value, ORD);
    }

    /// Takes one ship away, never going below zero.  Returns what is left.
    pub fn lose_ship(&self) -> i32 {
        let prev = self
            .ships_left
            .fetch_update(ORD, ORD, |n| Some((n - 1).max(0)))
            .unwrap_or_else(|n| n);
        (prev - 1).max(0)
    }

    pub fn points(&self) -> u32 {
        self.points.load(ORD)
    }
    pub fn set_points(&self, value: u32) {
        self.points.store(value, ORD);
    }
    pub fn add_points(&self, amount: u32) {
        self.points.fetch_add(amount, ORD);
    }

    pub fn level(&self) -> u32 {
        self.level.load(ORD)
    }
    pub fn set_level(&self, value: u32) {
        self.level.store(value, ORD);
    }

    pub fn asteroids_destroyed(&self) -> u64 {
        self.asteroids_destroyed.load(ORD)
    }
    pub fn set_asteroids_destroyed(&self, value: u64) {
        self.asteroids_destroyed.store(value, ORD);
    }

    /// Counts one asteroid and levels up on every multiple of
    /// `ASTEROIDS_PER_LEVEL`.  Returns true when the level went up.
    pub fn record_asteroid_destroyed(&self) -> bool {
        let count = self.asteroids_destroyed.fetch_add(1, ORD) + 1;
        if count % ASTEROIDS_PER_LEVEL == 0 {
            self.level.fetch_add(1, ORD);
            true
        } else {
            false
        }
    }

    pub fn enemy_ships_destroyed(&self) -> u64 {
        self.enemy_ships_destroyed.load(ORD)
    }
    pub fn set_enemy_ships_destroyed(&self, value: u64) {
        self.enemy_ships_destroyed.store(value, ORD);
    }
    pub fn record_enemy_ship_destroyed(&self) {
        self.enemy_ships_destroyed.fetch_add(1, ORD);
    }

    pub fn boss_ships_destroyed(&self) -> u64 {
        self.boss_ships_destroyed.load(ORD)
    }
    pub fn set_boss_ships_destroyed(&self, value: u64) {
        self.boss_ships_destroyed.store(value, ORD);
    }
    pub fn record_boss_ship_destroyed(&self) {
        self.boss_ships_destroyed.fetch_add(1, ORD);
    }

    // ── Whole-status operations ──────────────────────────────────────────────

    /// Puts every field back to its new-game value and enters `Starting`.
    pub fn reset_for_new_game(&self) {
        self.set_game_over(false);
        self.set_game_started(false);

        self.set_ships_left(INITIAL_SHIPS);
        self.set_points(0);
        self.set_level(INITIAL_LEVEL);
        self.set_asteroids_destroyed(0);
        self.set_enemy_ships_destroyed(0);
        self.set_boss_ships_destroyed(0);

        self.set_new_ship(false);
        self.set_new_asteroid(false);
        self.set_new_second_asteroid(false);
        self.set_new_enemy_ship(false);
        self.set_new_second_enemy_ship(false);
        self.set_new_boss_ship(false);

        self.set_game_starting(true);
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            phase: self.phase(),
            ships_left: self.ships_left(),
            points: self.points(),
            level: self.level(),
            asteroids_destroyed: self.asteroids_destroyed(),
            enemy_ships_destroyed: self.enemy_ships_destroyed(),
            boss_ships_destroyed: self.boss_ships_destroyed(),
        }
    }
}
