/// All game entity types — pure data, no logic.

use crossterm::style::Color;

// ── Glyphs ────────────────────────────────────────────────────────────────────

pub const ARCHER_GLYPH: &str = "|)";
pub const ARROW_GLYPH: &str = "═>";

/// Shown where a balloon was hit.  7 columns × 3 rows.
pub const EXPLOSION_GLYPH: &[&str] = &["  \\|/  ", "  /|\\  ", "   *   "];
pub const EXPLOSION_WIDTH: i32 = 7;
pub const EXPLOSION_HEIGHT: i32 = 3;

// ── Player actions ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    Shoot,
    Quit,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// An arrow flies right along the lane it was fired in.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub x: i32,
    pub y: i32,
    pub active: bool,
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    pub x: i32,
    pub y: i32,
    pub popped: bool,
    pub symbol: &'static [&'static str],
    pub color: Color,
    pub width: i32,
    pub height: i32,
}

impl Balloon {
    /// Swap the balloon's art for the explosion glyph and mark it popped.
    pub fn burst(&mut self) {
        self.popped = true;
        self.symbol = EXPLOSION_GLYPH;
        self.width = EXPLOSION_WIDTH;
        self.height = EXPLOSION_HEIGHT;
    }
}

/// A brief visual left behind where a balloon was hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub symbol: &'static [&'static str],
    /// Remaining frames to display.
    pub frames: u32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Lane (row) the archer stands in, `0..height`.
    pub archer: i32,
    pub arrows: Vec<Arrow>,
    pub balloons: Vec<Balloon>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    /// Horizontal drift bounds for balloons.
    pub min_balloon_x: i32,
    pub max_balloon_x: i32,
    /// Probability that a tick spawns a balloon.
    pub spawn_chance: f64,
    pub frame: u64,
    pub width: i32,
    pub height: i32,
}

impl GameState {
    pub fn active_arrows(&self) -> usize {
        self.arrows.iter().filter(|a| a.active).count()
    }
}
