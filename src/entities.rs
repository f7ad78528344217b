/// All game entity types: geometry and per-type constants, no game rules.
///
/// Every entity embeds a plain `Rect`.  "Destroyed" entities are parked
/// off-canvas instead of being dropped; only bullets leave their collection.

use rand::Rng;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in canvas pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_location(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Strict overlap test: rectangles that only share an edge do not intersect,
/// and empty rectangles never intersect anything.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    if a.width <= 0 || a.height <= 0 || b.width <= 0 || b.height <= 0 {
        return false;
    }
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: i32,
    pub height: i32,
}

impl Canvas {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Random left edge that keeps an entity of `entity_width` fully on screen.
    pub fn random_x(&self, entity_width: i32, rng: &mut impl Rng) -> i32 {
        let span = self.width - entity_width;
        if span <= 0 {
            0
        } else {
            rng.gen_range(0..span)
        }
    }
}

// ── Slots & directions ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsteroidSlot {
    First,
    Second,
}

/// Horizontal drift of an enemy while it descends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Sign applied to the horizontal step.
    pub fn drift(self) -> i32 {
        match self {
            Lane::Left => -1,
            Lane::Right => 1,
        }
    }
}

/// One destructible instance on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Asteroid(AsteroidSlot),
    Enemy(Lane),
    Boss,
}

impl Target {
    /// Scan order used by the collision pass.
    pub const ALL: [Target; 5] = [
        Target::Asteroid(AsteroidSlot::First),
        Target::Asteroid(AsteroidSlot::Second),
        Target::Enemy(Lane::Left),
        Target::Enemy(Lane::Right),
        Target::Boss,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

// ── Player ship ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    pub speed: i32,
}

impl Ship {
    pub const WIDTH: i32 = 25;
    pub const HEIGHT: i32 = 25;
    pub const DEFAULT_SPEED: i32 = 5;

    /// Bottom-centre of the canvas, one pixel above the edge.
    pub fn spawn(canvas: Canvas) -> Self {
        Self {
            rect: Rect::new(
                (canvas.width - Self::WIDTH) / 2,
                canvas.height - Self::HEIGHT - 1,
                Self::WIDTH,
                Self::HEIGHT,
            ),
            speed: Self::DEFAULT_SPEED,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: i32,
}

impl Bullet {
    pub const WIDTH: i32 = 8;
    pub const HEIGHT: i32 = 8;
    pub const DEFAULT_SPEED: i32 = 12;

    /// Centred on the ship's nose, just above it.
    pub fn from_ship(ship: &Ship) -> Self {
        Self {
            rect: Rect::new(
                ship.rect.x + ship.rect.width / 2 - Self::WIDTH / 2,
                ship.rect.y - Self::HEIGHT,
                Self::WIDTH,
                Self::HEIGHT,
            ),
            speed: Self::DEFAULT_SPEED,
        }
    }
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub rect: Rect,
    pub speed: i32,
}

impl Asteroid {
    pub const WIDTH: i32 = 32;
    pub const HEIGHT: i32 = 32;
    pub const DEFAULT_SPEED: i32 = 4;

    pub fn spawn(canvas: Canvas, rng: &mut impl Rng) -> Self {
        Self {
            rect: Rect::new(canvas.random_x(Self::WIDTH, rng), 0, Self::WIDTH, Self::HEIGHT),
            speed: Self::DEFAULT_SPEED,
        }
    }
}

/// Regular enemies and the boss share this shape; the boss is told apart by
/// the slot it occupies in `GameLogic`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyShip {
    pub rect: Rect,
    pub speed: i32,
}

impl EnemyShip {
    pub const WIDTH: i32 = 25;
    pub const HEIGHT: i32 = 25;
    pub const DEFAULT_SPEED: i32 = 2;

    pub fn spawn(canvas: Canvas, rng: &mut impl Rng) -> Self {
        Self {
            rect: Rect::new(canvas.random_x(Self::WIDTH, rng), 0, Self::WIDTH, Self::HEIGHT),
            speed: Self::DEFAULT_SPEED,
        }
    }
}
