/// Seams between the core and its front end.
///
/// The core only ever asks a front end to draw rectangles, play effects and
/// report the canvas size.  Both traits are fire-and-forget: nothing they do
/// feeds back into game state.

use crate::entities::{Canvas, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ship,
    Bullet,
    Asteroid,
    EnemyShip,
    BossShip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    BulletFired,
    AsteroidExplosion,
    ShipExplosion,
    GameTheme,
}

pub trait Render {
    fn draw_entity(&mut self, kind: EntityKind, rect: Rect);
    fn draw_explosion(&mut self, rect: Rect);
    /// Called once the status has been reset for a new game.
    fn prepare_new_game(&mut self);
    fn prepare_game_over(&mut self);
    fn canvas_width(&self) -> i32;
    fn canvas_height(&self) -> i32;

    fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width(), self.canvas_height())
    }
}

pub trait Sound {
    fn play(&self, effect: SoundEffect);
}

/// Sound adapter that drops every effect.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Sound for Silent {
    fn play(&self, _effect: SoundEffect) {}
}
