/// Per-frame update and collision engine.
///
/// `FrameUpdate::tick` is called once per frame by the front end.  It applies
/// due phase transitions, moves every target along its fixed pattern, runs the
/// respawn windows, advances bullets, resolves bullet and ship collisions and
/// finally checks for game over, all against the state owned by `GameLogic`.
/// Randomness and the clock are injected so tests can replay a frame exactly.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::adapters::{EntityKind, Render, Sound, SoundEffect};
use crate::entities::{intersects, AsteroidSlot, Lane, Rect, Target};
use crate::logic::GameLogic;
use crate::status::{GameStatus, Phase};

/// How long a destroyed entity stays exploded before it comes back.
pub const RESPAWN_DELAY_MS: u64 = 500;

/// Score awarded per target destroyed by a bullet.
pub fn points_for(target: Target) -> u32 {
    match target {
        Target::Asteroid(_) => 100,
        Target::Enemy(_) | Target::Boss => 250,
    }
}

/// The boss drifts left down the middle of the field.
const BOSS_DRIFT: i32 = -1;

/// Fixed movement pattern: horizontal drift sign and vertical multiplier.
fn pattern(target: Target) -> (i32, i32) {
    match target {
        Target::Asteroid(_) => (0, 1),
        Target::Enemy(Lane::Left) => (Lane::Left.drift(), 2),
        Target::Enemy(Lane::Right) => (Lane::Right.drift(), 1),
        Target::Boss => (BOSS_DRIFT, 1),
    }
}

fn kind_of(target: Target) -> EntityKind {
    match target {
        Target::Asteroid(_) => EntityKind::Asteroid,
        Target::Enemy(_) => EntityKind::EnemyShip,
        Target::Boss => EntityKind::BossShip,
    }
}

fn timer_index(target: Target) -> usize {
    match target {
        Target::Asteroid(AsteroidSlot::First) => 0,
        Target::Asteroid(AsteroidSlot::Second) => 1,
        Target::Enemy(Lane::Left) => 2,
        Target::Enemy(Lane::Right) => 3,
        Target::Boss => 4,
    }
}

// ── Respawn windows ──────────────────────────────────────────────────────────

/// When an entity was destroyed and where its explosion is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RespawnTimer {
    pub destroyed_at: Option<u64>,
    pub explosion: Option<Rect>,
}

impl RespawnTimer {
    pub fn record(&mut self, now: u64, rect: Rect) {
        self.destroyed_at = Some(now);
        self.explosion = Some(rect);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True once the respawn delay has fully passed (or nothing was recorded).
    pub fn elapsed(&self, now: u64) -> bool {
        match self.destroyed_at {
            Some(at) => now.saturating_sub(at) > RESPAWN_DELAY_MS,
            None => true,
        }
    }

    /// Explosion still inside its display window at `now`.
    pub fn explosion_at(&self, now: u64) -> Option<Rect> {
        let at = self.destroyed_at?;
        if now.saturating_sub(at) < RESPAWN_DELAY_MS {
            self.explosion
        } else {
            None
        }
    }
}

// ── Tick report ──────────────────────────────────────────────────────────────

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub bullets_expired: usize,
    /// Targets destroyed by bullets, in scan order.
    pub hits: Vec<Target>,
    /// Target the ship crashed into, if any.
    pub ship_hit: Option<Target>,
    pub level_ups: u32,
    pub game_over: bool,
}

// ── Engine ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct FrameUpdate {
    ship_timer: RespawnTimer,
    target_timers: [RespawnTimer; 5],
    /// `GameLogic::games_started` the timers belong to.
    game: u64,
}

impl FrameUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ship_timer(&self) -> &RespawnTimer {
        &self.ship_timer
    }

    pub fn target_timer(&self, target: Target) -> &RespawnTimer {
        &self.target_timers[timer_index(target)]
    }

    /// Forgets every pending explosion.
    pub fn reset(&mut self) {
        let game = self.game;
        *self = Self {
            game,
            ..Self::default()
        };
    }

    pub fn tick<S: Sound>(
        &mut self,
        logic: &mut GameLogic<S>,
        render: &mut impl Render,
        rng: &mut impl Rng,
        now: u64,
    ) -> TickReport {
        let mut report = TickReport::default();
        logic.run_due_transitions(now);

        // Timers of a previous game are dropped on the first tick of the next.
        if self.game != logic.games_started() {
            self.reset();
            self.game = logic.games_started();
        }

        let status = Arc::clone(logic.status());
        match status.phase() {
            Phase::NotStarted | Phase::Starting => return report,
            Phase::GameOver => {
                self.draw_lingering_explosions(render, now);
                return report;
            }
            Phase::Playing => {}
        }

        // 1. Targets: move, wrap or run their respawn window.
        for target in Target::ALL {
            self.update_target(logic, &status, target, render, rng, now);
        }

        // 2. Bullets: draw, then advance; drop the ones leaving the top.
        report.bullets_expired = update_bullets(logic, render);

        // 3. Bullet ↔ target.
        for target in Target::ALL {
            if let Some(leveled) = self.bullet_collision(logic, &status, target, now) {
                report.hits.push(target);
                if leveled {
                    report.level_ups += 1;
                }
            }
        }

        // 4. Ship: respawn window or draw.
        self.update_ship(logic, &status, render, now);

        // 5. Ship ↔ target.
        if let Some((target, leveled)) = self.ship_collision(logic, &status, now) {
            report.ship_hit = Some(target);
            if leveled {
                report.level_ups += 1;
            }
        }

        // 6. End-of-game check in the same tick as the last crash.
        report.game_over = logic.check_conditions(now, render);
        report
    }

    fn update_target<S: Sound>(
        &mut self,
        logic: &mut GameLogic<S>,
        status: &GameStatus,
        target: Target,
        render: &mut impl Render,
        rng: &mut impl Rng,
        now: u64,
    ) {
        if status.is_new(target) {
            let timer = &mut self.target_timers[timer_index(target)];
            if timer.elapsed(now) {
                logic.respawn(target, rng);
                status.set_new(target, false);
                timer.clear();
                debug!(?target, "respawned");
            } else if let Some(rect) = timer.explosion {
                render.draw_explosion(rect);
            }
            return;
        }

        if target == Target::Boss && !logic.boss_active() {
            return;
        }

        let (drift, multiplier) = pattern(target);
        let speed = logic.target_speed(target);
        let canvas = logic.canvas();
        let rect = logic.target_rect_mut(target);
        if rect.y + speed < canvas.height {
            rect.translate(drift * speed, speed * multiplier);
            render.draw_entity(kind_of(target), *rect);
        } else {
            let x = canvas.random_x(rect.width, rng);
            rect.set_location(x, 0);
        }
    }

    /// Lets the first bullet that overlaps `target` destroy it.  Returns
    /// `Some(leveled_up)` on a hit.
    fn bullet_collision<S: Sound>(
        &mut self,
        logic: &mut GameLogic<S>,
        status: &GameStatus,
        target: Target,
        now: u64,
    ) -> Option<bool> {
        if status.is_new(target) || (target == Target::Boss && !logic.boss_active()) {
            return None;
        }

        let rect = *logic.target_rect(target);
        let index = logic
            .bullets()
            .iter()
            .position(|bullet| intersects(&rect, &bullet.rect))?;
        logic.bullets_mut().remove(index);

        status.add_points(points_for(target));
        let leveled = match target {
            Target::Asteroid(_) => status.record_asteroid_destroyed(),
            Target::Enemy(_) => {
                status.record_enemy_ship_destroyed();
                false
            }
            Target::Boss => {
                status.record_boss_ship_destroyed();
                false
            }
        };
        if leveled {
            info!(level = status.level(), "level up");
        }

        self.destroy_target(logic, status, target, now);
        logic.sound().play(SoundEffect::AsteroidExplosion);
        debug!(?target, points = status.points(), "target destroyed");
        Some(leveled)
    }

    fn update_ship<S: Sound>(
        &mut self,
        logic: &mut GameLogic<S>,
        status: &GameStatus,
        render: &mut impl Render,
        now: u64,
    ) {
        if !status.is_new_ship() {
            render.draw_entity(EntityKind::Ship, logic.ship().rect);
            return;
        }
        if self.ship_timer.elapsed(now) {
            logic.new_ship();
            status.set_new_ship(false);
            self.ship_timer.clear();
            debug!("ship respawned");
        } else if let Some(rect) = self.ship_timer.explosion {
            render.draw_explosion(rect);
        }
    }

    /// Crashes the ship into the first live target it overlaps.  Returns the
    /// target and whether the crash pushed the level up.
    fn ship_collision<S: Sound>(
        &mut self,
        logic: &mut GameLogic<S>,
        status: &GameStatus,
        now: u64,
    ) -> Option<(Target, bool)> {
        if status.is_new_ship() {
            return None;
        }

        let ship_rect = logic.ship().rect;
        let target = Target::ALL.into_iter().find(|&target| {
            !status.is_new(target)
                && (target != Target::Boss || logic.boss_active())
                && intersects(&ship_rect, logic.target_rect(target))
        })?;

        let ships_left = status.lose_ship();
        // Crashes count as asteroid kills whatever the target was.  Kept as-is
        // to match the established scoring; enemy/boss counters stay untouched.
        let leveled = status.record_asteroid_destroyed();

        self.destroy_target(logic, status, target, now);

        self.ship_timer.record(now, ship_rect);
        logic.park_ship();
        status.set_new_ship(true);

        logic.sound().play(SoundEffect::ShipExplosion);
        logic.sound().play(SoundEffect::AsteroidExplosion);
        info!(?target, ships_left, "ship lost");
        Some((target, leveled))
    }

    /// Records the explosion, parks the target off-canvas and flags it for respawn.
    fn destroy_target<S: Sound>(
        &mut self,
        logic: &mut GameLogic<S>,
        status: &GameStatus,
        target: Target,
        now: u64,
    ) {
        let rect = *logic.target_rect(target);
        self.target_timers[timer_index(target)].record(now, rect);
        logic.park_target(target);
        status.set_new(target, true);
    }

    fn draw_lingering_explosions(&self, render: &mut impl Render, now: u64) {
        let lingering = self
            .target_timers
            .iter()
            .chain(std::iter::once(&self.ship_timer))
            .filter_map(|timer| timer.explosion_at(now));
        for rect in lingering {
            render.draw_explosion(rect);
        }
    }
}

/// Draws every bullet, then steps it up.  Returns how many left the canvas.
fn update_bullets<S: Sound>(logic: &mut GameLogic<S>, render: &mut impl Render) -> usize {
    let bullets = logic.bullets_mut();
    let before = bullets.len();
    bullets.retain_mut(|bullet| {
        render.draw_entity(EntityKind::Bullet, bullet.rect);
        !GameLogic::<S>::move_bullet(bullet)
    });
    before - bullets.len()
}
