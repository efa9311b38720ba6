/// Frame composition — pure, no terminal I/O.
///
/// `build_grid` rasterizes the entities onto the playfield and
/// `compose_frame` stacks the title, bordered playfield, score and controls
/// into styled lines.  `display` (in the binary) turns a `Frame` into
/// terminal commands.

use crossterm::style::Color;
use unicode_width::UnicodeWidthStr;

use crate::entities::{GameState, ARCHER_GLYPH, ARROW_GLYPH};
use crate::input::CONTROLS_HINT;

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_ARCHER: Color = Color::AnsiValue(214);
pub const C_EXPLOSION: Color = Color::AnsiValue(226);
pub const C_BORDER: Color = Color::AnsiValue(63);
pub const C_TITLE: Color = Color::AnsiValue(213);
pub const C_SCORE: Color = Color::AnsiValue(205);
pub const C_HINT: Color = Color::AnsiValue(241);

pub const TITLE: &str = "🎯 Balloon Archer 🎈";

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', color: None };
}

/// A `height × width` block of styled cells.
#[derive(Clone, Debug)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Grid {
            width,
            height,
            rows: vec![vec![Cell::BLANK; w]; h],
        }
    }

    /// Write `text` starting at `(x, y)`, one char per cell.  Anything that
    /// falls outside the grid is dropped.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, color: Option<Color>) {
        if y < 0 || y >= self.height {
            return;
        }
        let row = &mut self.rows[y as usize];
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i32;
            if cx < 0 {
                continue;
            }
            if cx >= self.width {
                break;
            }
            row[cx as usize] = Cell { ch, color };
        }
    }

    /// Write a multi-line glyph with its top-left corner at `(x, y)`.
    pub fn put_glyph(&mut self, x: i32, y: i32, lines: &[&str], color: Option<Color>) {
        for (i, line) in lines.iter().enumerate() {
            self.put_str(x, y + i as i32, line, color);
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

/// Rasterize every entity onto a fresh playfield grid.
pub fn build_grid(state: &GameState) -> Grid {
    let mut grid = Grid::new(state.width, state.height);

    grid.put_str(0, state.archer, ARCHER_GLYPH, Some(C_ARCHER));

    for arrow in state.arrows.iter().filter(|a| a.active) {
        grid.put_str(arrow.x, arrow.y, ARROW_GLYPH, None);
    }

    for balloon in state.balloons.iter().filter(|b| !b.popped) {
        grid.put_glyph(balloon.x, balloon.y, balloon.symbol, Some(balloon.color));
    }

    for explosion in &state.explosions {
        grid.put_glyph(explosion.x, explosion.y, explosion.symbol, Some(C_EXPLOSION));
    }

    grid
}

// ── Frame ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub text: String,
    pub color: Option<Color>,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span { text: text.into(), color: None, bold: false }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Span { text: text.into(), color: Some(color), bold: false }
    }

    /// Terminal cells the text occupies (emoji take two).
    fn width(&self) -> usize {
        self.text.width()
    }
}

pub type Line = Vec<Span>;

/// A complete screen's worth of styled lines.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    pub fn width(&self) -> usize {
        self.lines.iter().map(|l| line_width(l)).max().unwrap_or(0)
    }

    /// The frame without styling, one `\n`-terminated row per line.
    pub fn to_plain_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            for span in line {
                text.push_str(&span.text);
            }
            text.push('\n');
        }
        text
    }
}

fn line_width(line: &[Span]) -> usize {
    line.iter().map(Span::width).sum()
}

/// Collapse a row of cells into spans of identical colour.
fn row_spans(row: &[Cell]) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for cell in row {
        match spans.last_mut() {
            Some(last) if last.color == cell.color => last.text.push(cell.ch),
            _ => spans.push(Span {
                text: cell.ch.to_string(),
                color: cell.color,
                bold: false,
            }),
        }
    }
    spans
}

/// Wrap the grid in a rounded border with one column of padding each side.
fn bordered(grid: &Grid) -> Vec<Line> {
    let inner = grid.width.max(0) as usize + 2;
    let mut lines = Vec::with_capacity(grid.rows().len() + 2);

    lines.push(vec![Span::colored(format!("╭{}╮", "─".repeat(inner)), C_BORDER)]);
    for row in grid.rows() {
        let mut line = vec![Span::colored("│ ", C_BORDER)];
        line.extend(row_spans(row));
        line.push(Span::colored(" │", C_BORDER));
        lines.push(line);
    }
    lines.push(vec![Span::colored(format!("╰{}╯", "─".repeat(inner)), C_BORDER)]);

    lines
}

/// Stack title, playfield, score and controls, centred on the widest block.
pub fn compose_frame(state: &GameState) -> Frame {
    let grid = build_grid(state);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(vec![Span {
        text: TITLE.to_string(),
        color: Some(C_TITLE),
        bold: true,
    }]);
    lines.push(Vec::new());
    lines.extend(bordered(&grid));
    lines.push(Vec::new());
    lines.push(vec![Span::colored(format!("Score: {}", state.score), C_SCORE)]);
    lines.push(Vec::new());
    lines.push(vec![Span::colored(CONTROLS_HINT, C_HINT)]);

    let mut frame = Frame { lines };
    let width = frame.width();
    for line in frame.lines.iter_mut() {
        let w = line_width(line);
        if !line.is_empty() && w < width {
            line.insert(0, Span::plain(" ".repeat((width - w) / 2)));
        }
    }

    frame
}
