/// Balloon spawner.
///
/// Every tick the simulation asks for at most one new balloon.  All
/// randomness comes through the injected RNG.

use crossterm::style::Color;
use rand::Rng;
use tracing::debug;

use crate::entities::Balloon;

/// Terminal width the spawn range is measured against (before padding).
pub const SCREEN_WIDTH: i32 = 80;

/// Default probability of a spawn on any given tick.
pub const DEFAULT_SPAWN_CHANCE: f64 = 0.1;

// ── Art table ─────────────────────────────────────────────────────────────────

const BALLOON_ROUND: &[&str] = &[
    "  .-^^-.",
    " /      \\",
    "|        |",
    " \\      /",
    "  `----´",
    "    ||   ",
];

const BALLOON_OVAL: &[&str] = &[
    "  .===.",
    " (     )",
    "|       |",
    " (     )",
    "  `---´",
    "   ||  ",
];

const BALLOON_RING: &[&str] = &[
    "  _____",
    " /     \\",
    "|   ○   |",
    " \\     /",
    "  ‾‾‾‾‾",
    "   ||   ",
];

const BALLOON_DOT: &[&str] = &[
    "  .===.",
    " /     \\",
    "|   •   |",
    " \\     /",
    "  `---´",
    "   ||   ",
];

/// Each art variant paired with its colour (256-colour palette).
pub const VARIANTS: [(&[&str], Color); 4] = [
    (BALLOON_ROUND, Color::AnsiValue(213)), // pink
    (BALLOON_OVAL, Color::AnsiValue(204)),  // red
    (BALLOON_RING, Color::AnsiValue(39)),   // blue
    (BALLOON_DOT, Color::AnsiValue(48)),    // green
];

/// Collision width of a glyph: the length of its top line.  Lower lines
/// may be wider; they are drawn but do not count toward the hit box.
pub fn glyph_width(symbol: &[&str]) -> i32 {
    symbol.first().map_or(0, |l| l.chars().count()) as i32
}

pub fn glyph_height(symbol: &[&str]) -> i32 {
    symbol.len() as i32
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// Roll against `chance`; on success build one balloon.
pub fn maybe_spawn(
    chance: f64,
    screen_width: i32,
    spawn_y: i32,
    rng: &mut impl Rng,
) -> Option<Balloon> {
    if rng.gen::<f64>() < chance {
        Some(spawn_balloon(screen_width, spawn_y, rng))
    } else {
        None
    }
}

/// Build a balloon with a random variant at a random x in the right half
/// of the screen.
pub fn spawn_balloon(screen_width: i32, spawn_y: i32, rng: &mut impl Rng) -> Balloon {
    let (symbol, color) = VARIANTS[rng.gen_range(0..VARIANTS.len())];
    let width = glyph_width(symbol);
    let height = glyph_height(symbol);

    let min_x = screen_width / 2;
    let max_x = screen_width - width - 2;
    let x = if max_x > min_x {
        rng.gen_range(min_x..max_x)
    } else {
        min_x
    };

    debug!(x, y = spawn_y, width, "balloon spawned");

    Balloon {
        x,
        y: spawn_y,
        popped: false,
        symbol,
        color,
        width,
        height,
    }
}
