#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use caw_space::adapters::{EntityKind, Render, Sound, SoundEffect};
use caw_space::entities::{Canvas, Rect, Target};
use caw_space::logic::GameLogic;
use caw_space::schedule::NEW_GAME_DELAY_MS;
use caw_space::status::GameStatus;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub const CANVAS: Canvas = Canvas::new(500, 400);
/// First millisecond of play for a game requested at t=0.
pub const PLAY_START: u64 = NEW_GAME_DELAY_MS;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Recording adapters ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingRender {
    pub entities: Vec<(EntityKind, Rect)>,
    pub explosions: Vec<Rect>,
    pub new_games: u32,
    pub game_overs: u32,
}

impl RecordingRender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.explosions.clear();
    }

    pub fn drawn(&self, kind: EntityKind) -> Vec<Rect> {
        self.entities
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, r)| *r)
            .collect()
    }
}

impl Render for RecordingRender {
    fn draw_entity(&mut self, kind: EntityKind, rect: Rect) {
        self.entities.push((kind, rect));
    }

    fn draw_explosion(&mut self, rect: Rect) {
        self.explosions.push(rect);
    }

    fn prepare_new_game(&mut self) {
        self.new_games += 1;
    }

    fn prepare_game_over(&mut self) {
        self.game_overs += 1;
    }

    fn canvas_width(&self) -> i32 {
        CANVAS.width
    }

    fn canvas_height(&self) -> i32 {
        CANVAS.height
    }
}

#[derive(Default)]
pub struct RecordingSound {
    played: Mutex<Vec<SoundEffect>>,
}

impl RecordingSound {
    pub fn played(&self) -> Vec<SoundEffect> {
        self.played.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.played.lock().unwrap().clear();
    }
}

impl Sound for RecordingSound {
    fn play(&self, effect: SoundEffect) {
        self.played.lock().unwrap().push(effect);
    }
}

// ── Game setup ────────────────────────────────────────────────────────────────

pub fn new_logic(rng: &mut StdRng) -> GameLogic<RecordingSound> {
    GameLogic::new(
        Arc::new(GameStatus::new()),
        CANVAS,
        RecordingSound::default(),
        rng,
    )
}

/// Parks every target above the top-left corner, well away from the ship and
/// from any bullet a test places on the canvas.
pub fn clear_field(logic: &mut GameLogic<RecordingSound>) {
    for target in Target::ALL {
        logic.park_target(target);
    }
}

/// A game requested at t=0 and already in play at `PLAY_START`, with an
/// empty field and nothing recorded yet.
pub fn playing_game(
    rng: &mut StdRng,
) -> (GameLogic<RecordingSound>, RecordingRender) {
    let mut logic = new_logic(rng);
    let mut render = RecordingRender::new();
    assert!(logic.new_game(0, rng, &mut render));
    logic.run_due_transitions(PLAY_START);
    clear_field(&mut logic);
    logic.sound().clear();
    render.clear();
    (logic, render)
}

pub fn place(logic: &mut GameLogic<RecordingSound>, target: Target, x: i32, y: i32) {
    logic.target_rect_mut(target).set_location(x, y);
}
