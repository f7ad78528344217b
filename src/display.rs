/// Rendering layer: all terminal I/O lives here.
///
/// `TerminalRenderer` is the core's render adapter: during a tick it only
/// records what should be drawn.  `render` then turns that list plus a status
/// snapshot into terminal commands, scaling the pixel canvas onto the
/// terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use caw_space::adapters::{EntityKind, Render};
use caw_space::entities::{Canvas, Rect};
use caw_space::status::{Phase, StatusSnapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_LABEL: Color = Color::Grey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_SHIPS: Color = Color::White;
const C_HUD_SHIPS_LOST: Color = Color::DarkRed;
const C_SHIP: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_ASTEROID: Color = Color::DarkYellow;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Red;
const C_TITLE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

// ── Render adapter ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Entity(EntityKind),
    Explosion,
}

#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
}

pub struct TerminalRenderer {
    canvas: Canvas,
    sprites: Vec<Sprite>,
    /// Set by `prepare_game_over`: the ships counter turns dark red until the
    /// next game.
    ships_alert: bool,
}

impl TerminalRenderer {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            sprites: Vec::new(),
            ships_alert: false,
        }
    }

    /// Drops last frame's draw list.
    pub fn begin_frame(&mut self) {
        self.sprites.clear();
    }
}

impl Render for TerminalRenderer {
    fn draw_entity(&mut self, kind: EntityKind, rect: Rect) {
        self.sprites.push(Sprite { kind: SpriteKind::Entity(kind), rect });
    }

    fn draw_explosion(&mut self, rect: Rect) {
        self.sprites.push(Sprite { kind: SpriteKind::Explosion, rect });
    }

    fn prepare_new_game(&mut self) {
        self.ships_alert = false;
        self.sprites.clear();
    }

    fn prepare_game_over(&mut self) {
        self.ships_alert = true;
    }

    fn canvas_width(&self) -> i32 {
        self.canvas.width
    }

    fn canvas_height(&self) -> i32 {
        self.canvas.height
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    renderer: &TerminalRenderer,
    status: &StatusSnapshot,
    bell: bool,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let grid = Grid::new(renderer.canvas, width, height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, status, renderer.ships_alert)?;

    match status.phase {
        Phase::NotStarted => draw_title(out, width, height)?,
        Phase::Starting => draw_centered(out, width, height / 2, "Get Ready!", Color::White)?,
        Phase::Playing => {
            for sprite in &renderer.sprites {
                draw_sprite(out, &grid, sprite)?;
            }
        }
        Phase::GameOver => {
            for sprite in &renderer.sprites {
                draw_sprite(out, &grid, sprite)?;
            }
            draw_game_over(out, status, width, height)?;
        }
    }

    draw_controls_hint(out, height)?;

    if bell {
        out.queue(Print("\x07"))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Pixel → cell mapping ──────────────────────────────────────────────────────

/// Maps canvas pixels onto the play area between the borders
/// (columns 1..w-1, rows 2..h-2).
struct Grid {
    canvas: Canvas,
    cols: i32,
    rows: i32,
}

impl Grid {
    fn new(canvas: Canvas, width: u16, height: u16) -> Self {
        Self {
            canvas,
            cols: (width as i32 - 2).max(1),
            rows: (height as i32 - 4).max(1),
        }
    }

    fn col(&self, x: i32) -> i32 {
        x * self.cols / self.canvas.width.max(1)
    }

    fn row(&self, y: i32) -> i32 {
        y * self.rows / self.canvas.height.max(1)
    }

    /// Cells covered by `rect`, clipped to the play area.  Every visible
    /// rectangle covers at least one cell.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.right() <= 0
            || rect.bottom() <= 0
            || rect.x >= self.canvas.width
            || rect.y >= self.canvas.height
        {
            return None;
        }
        let c0 = self.col(rect.x);
        let r0 = self.row(rect.y);
        let c1 = self.col(rect.right() - 1).max(c0);
        let r1 = self.row(rect.bottom() - 1).max(r0);
        if c1 < 0 || r1 < 0 || c0 >= self.cols || r0 >= self.rows {
            return None;
        }
        let c0 = c0.max(0);
        let r0 = r0.max(0);
        let c1 = c1.min(self.cols - 1);
        let r1 = r1.min(self.rows - 1);
        Some(((c0 + 1) as u16, (r0 + 2) as u16, (c1 + 1) as u16, (r1 + 2) as u16))
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;
    let h = height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    status: &StatusSnapshot,
    ships_alert: bool,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;

    out.queue(style::SetForegroundColor(C_HUD_LABEL))?;
    out.queue(Print("Ships: "))?;
    out.queue(style::SetForegroundColor(if ships_alert {
        C_HUD_SHIPS_LOST
    } else {
        C_HUD_SHIPS
    }))?;
    out.queue(Print(format!("{:<3}", status.ships_left)))?;

    out.queue(style::SetForegroundColor(C_HUD_LABEL))?;
    out.queue(Print(" Points: "))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("{:<7}", status.points)))?;

    out.queue(style::SetForegroundColor(C_HUD_LABEL))?;
    out.queue(Print(format!(
        " Level: {:<3} Asteroids: {:<5} Ships Destroyed: {}",
        status.level,
        status.asteroids_destroyed,
        status.enemy_ships_destroyed + status.boss_ships_destroyed
    )))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn glyph(kind: SpriteKind) -> (&'static str, Color) {
    match kind {
        SpriteKind::Entity(EntityKind::Ship) => ("▲", C_SHIP),
        SpriteKind::Entity(EntityKind::Bullet) => ("║", C_BULLET),
        SpriteKind::Entity(EntityKind::Asteroid) => ("●", C_ASTEROID),
        SpriteKind::Entity(EntityKind::EnemyShip) => ("▼", C_ENEMY),
        SpriteKind::Entity(EntityKind::BossShip) => ("◆", C_BOSS),
        SpriteKind::Explosion => ("✸", C_EXPLOSION),
    }
}

fn draw_sprite<W: Write>(out: &mut W, grid: &Grid, sprite: &Sprite) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = grid.cells(&sprite.rect) else {
        return Ok(());
    };
    let (symbol, color) = glyph(sprite.kind);
    out.queue(style::SetForegroundColor(color))?;
    let line = symbol.repeat((c1 - c0 + 1) as usize);
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Messages ──────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_title<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, width, cy.saturating_sub(2), "★  CAW  SPACE  ★", C_TITLE)?;
    draw_centered(out, width, cy, "Press <Space> to Start a New Game.", Color::White)?;
    draw_centered(out, width, cy + 1, "Press <Esc> to Exit the Game.", Color::White)?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / WASD : Move   SPACE : Start / Shoot   ESC : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    status: &StatusSnapshot,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let total_rows = lines.len() + 2;
    let start_row = (height / 2).saturating_sub(total_rows as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        draw_centered(out, width, start_row + i as u16, msg, *color)?;
    }

    let score_line = format!("Final Score: {:>6}", status.points);
    let level_line = format!("Reached Level: {:>4}", status.level);
    let row = start_row + lines.len() as u16;
    draw_centered(out, width, row, &score_line, Color::Yellow)?;
    draw_centered(out, width, row + 1, &level_line, Color::DarkGrey)?;

    Ok(())
}
