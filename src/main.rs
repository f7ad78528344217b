mod display;
mod sound;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use caw_space::compute::FrameUpdate;
use caw_space::config::Config;
use caw_space::entities::Direction;
use caw_space::logging;
use caw_space::logic::GameLogic;
use caw_space::status::{GameStatus, Phase};

use display::TerminalRenderer;
use sound::TerminalSound;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "caw_space", about = "Terminal arcade shooter")]
struct Cli {
    /// TOML config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<i32>,
    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<i32>,
    /// Milliseconds per frame.
    #[arg(long)]
    frame_ms: Option<u64>,
    /// Fixed RNG seed.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    log_file: Option<String>,
    /// Only bring the boss in on levels divisible by this.
    #[arg(long)]
    boss_every: Option<u32>,
    /// Never ring the terminal bell.
    #[arg(long)]
    mute: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };
        if let Some(v) = self.width {
            cfg.canvas_width = v;
        }
        if let Some(v) = self.height {
            cfg.canvas_height = v;
        }
        if let Some(v) = self.frame_ms {
            cfg.frame_ms = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(v) = self.log_file {
            cfg.log_file = v;
        }
        if self.boss_every.is_some() {
            cfg.boss_every = self.boss_every;
        }
        cfg.mute |= self.mute;
        cfg.validate()?;
        Ok(cfg)
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Same input model as a held-key map: every press/repeat refreshes the key's
/// frame stamp, releases remove it, and each frame applies every key that is
/// still fresh.  Space is edge-triggered for starting a game and level-triggered
/// (rate limited by the core) for firing.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, cfg: &Config) -> Result<()> {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let status = Arc::new(GameStatus::new());
    let mut logic = GameLogic::new(
        Arc::clone(&status),
        cfg.canvas(),
        TerminalSound::new(cfg.mute),
        &mut rng,
    )
    .with_boss_every(cfg.boss_every);
    let mut engine = FrameUpdate::new();
    let mut renderer = TerminalRenderer::new(cfg.canvas());

    let frame_len = Duration::from_millis(cfg.frame_ms);
    let clock = Instant::now();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed().as_millis() as u64;
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') if status.phase() == Phase::NotStarted => {
                            logic.new_game(now, &mut rng, &mut renderer);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        if status.phase() == Phase::Playing {
            let steering = [
                (Direction::Left, [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
                (Direction::Right, [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
                (Direction::Up, [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
                (Direction::Down, [KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
            ];
            for (direction, keys) in steering {
                if any_held(&key_frame, &keys, frame) {
                    logic.move_ship(direction);
                }
            }
            if is_held(&key_frame, &KeyCode::Char(' '), frame) {
                logic.request_fire(now);
            }
        }

        renderer.begin_frame();
        engine.tick(&mut logic, &mut renderer, &mut rng, now);

        let bell = logic.sound().take_bell();
        display::render(out, &renderer, &status.snapshot(), bell)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cfg = Cli::parse().into_config()?;
    logging::init(&cfg.log_file)?;
    info!(?cfg, "starting caw_space");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &cfg);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("exiting");
    result
}
