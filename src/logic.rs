/// Game lifecycle and entity ownership.
///
/// `GameLogic` is the only owner of the ship, the targets and the bullet
/// collection.  It mutates the shared `GameStatus` for new-game / game-over
/// transitions and queues the delayed halves of those transitions on its
/// `Scheduler`.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::adapters::{Render, Sound, SoundEffect};
use crate::entities::{
    Asteroid, AsteroidSlot, Bullet, Canvas, Direction, EnemyShip, Lane, Rect, Ship, Target,
};
use crate::schedule::{Scheduler, Transition, GAME_OVER_DELAY_MS, NEW_GAME_DELAY_MS};
use crate::status::{GameStatus, Phase};

/// Minimum gap between two shots triggered through `request_fire`.
pub const FIRE_COOLDOWN_MS: u64 = 200;

pub struct GameLogic<S: Sound> {
    status: Arc<GameStatus>,
    sound: S,
    canvas: Canvas,
    scheduler: Scheduler,

    ship: Ship,
    asteroid: Asteroid,
    second_asteroid: Asteroid,
    enemy_ship: EnemyShip,
    second_enemy_ship: EnemyShip,
    boss_ship: EnemyShip,
    bullets: Vec<Bullet>,

    /// `None` keeps the boss on the field at every level.
    boss_every: Option<u32>,
    last_shot_at: Option<u64>,
    /// Bumped by every accepted `new_game`.
    games_started: u64,
}

impl<S: Sound> GameLogic<S> {
    pub fn new(status: Arc<GameStatus>, canvas: Canvas, sound: S, rng: &mut impl Rng) -> Self {
        Self {
            status,
            sound,
            canvas,
            scheduler: Scheduler::new(),
            ship: Ship::spawn(canvas),
            asteroid: Asteroid::spawn(canvas, rng),
            second_asteroid: Asteroid::spawn(canvas, rng),
            enemy_ship: EnemyShip::spawn(canvas, rng),
            second_enemy_ship: EnemyShip::spawn(canvas, rng),
            boss_ship: EnemyShip::spawn(canvas, rng),
            bullets: Vec::new(),
            boss_every: None,
            last_shot_at: None,
            games_started: 0,
        }
    }

    /// Only bring the boss in on levels divisible by `every`.
    pub fn with_boss_every(mut self, every: Option<u32>) -> Self {
        self.boss_every = every.filter(|n| *n > 0);
        self
    }

    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// Starts a new game if none is in progress.  Requests made while a game
    /// is starting, running or showing its game-over screen are ignored.
    pub fn new_game(&mut self, now: u64, rng: &mut impl Rng, render: &mut impl Render) -> bool {
        let phase = self.status.phase();
        if phase != Phase::NotStarted {
            debug!(?phase, "new game request ignored");
            return false;
        }

        self.status.reset_for_new_game();
        self.games_started += 1;
        self.sound.play(SoundEffect::GameTheme);

        self.bullets.clear();
        self.last_shot_at = None;
        self.scheduler.clear();
        self.canvas = render.canvas();

        self.new_ship();
        self.new_enemy_ship(Lane::Left, rng);
        self.new_enemy_ship(Lane::Right, rng);
        self.new_boss_ship(rng);
        self.new_asteroid(AsteroidSlot::First, rng);
        self.new_asteroid(AsteroidSlot::Second, rng);

        render.prepare_new_game();
        self.scheduler
            .schedule(now + NEW_GAME_DELAY_MS, Transition::BeginPlay);

        info!(
            game = self.games_started,
            canvas_width = self.canvas.width,
            canvas_height = self.canvas.height,
            "new game"
        );
        true
    }

    /// Applies every scheduled transition that is due at `now`.
    pub fn run_due_transitions(&mut self, now: u64) {
        for action in self.scheduler.take_due(now) {
            match action {
                Transition::BeginPlay => {
                    self.status.set_game_starting(false);
                    self.status.set_game_started(true);
                    info!("game started");
                }
                Transition::ReturnToTitle => {
                    self.status.set_game_over(false);
                    info!("back to title");
                }
            }
        }
    }

    /// Ends the game when the last ship is gone.  Returns true only on the
    /// call that performs the transition.
    pub fn check_conditions(&mut self, now: u64, render: &mut impl Render) -> bool {
        if !self.status.is_game_over()
            && self.status.is_game_started()
            && self.status.ships_left() <= 0
        {
            self.game_over(now, render);
            return true;
        }
        false
    }

    pub fn game_over(&mut self, now: u64, render: &mut impl Render) {
        self.status.set_game_started(false);
        self.status.set_game_over(true);
        render.prepare_game_over();
        self.scheduler
            .schedule(now + GAME_OVER_DELAY_MS, Transition::ReturnToTitle);

        info!(
            points = self.status.points(),
            level = self.status.level(),
            asteroids = self.status.asteroids_destroyed(),
            "game over"
        );
    }

    // ── Bullets ──────────────────────────────────────────────────────────────

    pub fn fire_bullet(&mut self) {
        self.bullets.push(Bullet::from_ship(&self.ship));
        self.sound.play(SoundEffect::BulletFired);
    }

    /// Input-side trigger: fires only during play, with a live ship, and no
    /// more often than `FIRE_COOLDOWN_MS`.
    pub fn request_fire(&mut self, now: u64) -> bool {
        if self.status.phase() != Phase::Playing || self.status.is_new_ship() {
            return false;
        }
        if let Some(last) = self.last_shot_at {
            if now.saturating_sub(last) < FIRE_COOLDOWN_MS {
                return false;
            }
        }
        self.last_shot_at = Some(now);
        self.fire_bullet();
        true
    }

    /// Moves `bullet` up one step.  Returns true when that step would leave
    /// the top of the canvas; the bullet is left where it was and the caller
    /// drops it.
    pub fn move_bullet(bullet: &mut Bullet) -> bool {
        if bullet.rect.y - bullet.speed >= 0 {
            bullet.rect.translate(0, -bullet.speed);
            false
        } else {
            true
        }
    }

    // ── Ship steering ────────────────────────────────────────────────────────

    pub fn move_ship(&mut self, direction: Direction) {
        if self.status.is_new_ship() {
            return;
        }
        let speed = self.ship.speed;
        let rect = &mut self.ship.rect;
        match direction {
            Direction::Left => rect.x = (rect.x - speed).max(0),
            Direction::Right => rect.x = (rect.x + speed).min(self.canvas.width - rect.width),
            Direction::Up => rect.y = (rect.y - speed).max(0),
            Direction::Down => rect.y = (rect.y + speed).min(self.canvas.height - rect.height - 1),
        }
    }

    // ── Factories ────────────────────────────────────────────────────────────

    pub fn new_ship(&mut self) -> &Ship {
        self.ship = Ship::spawn(self.canvas);
        &self.ship
    }

    pub fn new_asteroid(&mut self, slot: AsteroidSlot, rng: &mut impl Rng) -> &Asteroid {
        let asteroid = Asteroid::spawn(self.canvas, rng);
        match slot {
            AsteroidSlot::First => {
                self.asteroid = asteroid;
                &self.asteroid
            }
            AsteroidSlot::Second => {
                self.second_asteroid = asteroid;
                &self.second_asteroid
            }
        }
    }

    pub fn new_enemy_ship(&mut self, lane: Lane, rng: &mut impl Rng) -> &EnemyShip {
        let enemy = EnemyShip::spawn(self.canvas, rng);
        match lane {
            Lane::Left => {
                self.enemy_ship = enemy;
                &self.enemy_ship
            }
            Lane::Right => {
                self.second_enemy_ship = enemy;
                &self.second_enemy_ship
            }
        }
    }

    pub fn new_boss_ship(&mut self, rng: &mut impl Rng) -> &EnemyShip {
        self.boss_ship = EnemyShip::spawn(self.canvas, rng);
        &self.boss_ship
    }

    /// Re-creates `target` at a fresh spawn position.
    pub fn respawn(&mut self, target: Target, rng: &mut impl Rng) {
        match target {
            Target::Asteroid(slot) => {
                self.new_asteroid(slot, rng);
            }
            Target::Enemy(lane) => {
                self.new_enemy_ship(lane, rng);
            }
            Target::Boss => {
                self.new_boss_ship(rng);
            }
        }
    }

    /// Moves `target` off-canvas, above the top-left corner.
    pub fn park_target(&mut self, target: Target) {
        let rect = self.target_rect_mut(target);
        let (w, h) = (rect.width, rect.height);
        rect.set_location(-w, -h);
    }

    /// Moves the ship off-canvas, past the top-right corner.
    pub fn park_ship(&mut self) {
        let x = self.canvas.width + self.ship.rect.width;
        let y = -self.ship.rect.height;
        self.ship.rect.set_location(x, y);
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn status(&self) -> &Arc<GameStatus> {
        &self.status
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn games_started(&self) -> u64 {
        self.games_started
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ship
    }

    pub fn asteroid(&self, slot: AsteroidSlot) -> &Asteroid {
        match slot {
            AsteroidSlot::First => &self.asteroid,
            AsteroidSlot::Second => &self.second_asteroid,
        }
    }

    pub fn asteroid_mut(&mut self, slot: AsteroidSlot) -> &mut Asteroid {
        match slot {
            AsteroidSlot::First => &mut self.asteroid,
            AsteroidSlot::Second => &mut self.second_asteroid,
        }
    }

    pub fn enemy_ship(&self, lane: Lane) -> &EnemyShip {
        match lane {
            Lane::Left => &self.enemy_ship,
            Lane::Right => &self.second_enemy_ship,
        }
    }

    pub fn enemy_ship_mut(&mut self, lane: Lane) -> &mut EnemyShip {
        match lane {
            Lane::Left => &mut self.enemy_ship,
            Lane::Right => &mut self.second_enemy_ship,
        }
    }

    pub fn boss_ship(&self) -> &EnemyShip {
        &self.boss_ship
    }

    pub fn boss_ship_mut(&mut self) -> &mut EnemyShip {
        &mut self.boss_ship
    }

    pub fn target_rect(&self, target: Target) -> &Rect {
        match target {
            Target::Asteroid(slot) => &self.asteroid(slot).rect,
            Target::Enemy(lane) => &self.enemy_ship(lane).rect,
            Target::Boss => &self.boss_ship.rect,
        }
    }

    pub fn target_rect_mut(&mut self, target: Target) -> &mut Rect {
        match target {
            Target::Asteroid(slot) => &mut self.asteroid_mut(slot).rect,
            Target::Enemy(lane) => &mut self.enemy_ship_mut(lane).rect,
            Target::Boss => &mut self.boss_ship.rect,
        }
    }

    pub fn target_speed(&self, target: Target) -> i32 {
        match target {
            Target::Asteroid(slot) => self.asteroid(slot).speed,
            Target::Enemy(lane) => self.enemy_ship(lane).speed,
            Target::Boss => self.boss_ship.speed,
        }
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }

    /// Whether the boss takes part at the current level.
    pub fn boss_active(&self) -> bool {
        match self.boss_every {
            None => true,
            Some(every) => self.status.level() % every == 0,
        }
    }
}
