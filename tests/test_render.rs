use balloon_archer::compute::init_state;
use balloon_archer::entities::*;
use balloon_archer::input::CONTROLS_HINT;
use balloon_archer::render::*;

use crossterm::style::Color;

fn make_state() -> GameState {
    init_state(0.0)
}

const SQUARE: &[&str] = &["+--+", "|  |", "+--+"];

fn square_at(x: i32, y: i32) -> Balloon {
    Balloon {
        x,
        y,
        popped: false,
        symbol: SQUARE,
        color: Color::AnsiValue(39),
        width: 4,
        height: 3,
    }
}

fn cell(g: &Grid, x: i32, y: i32) -> Option<Cell> {
    if x < 0 || y < 0 {
        return None;
    }
    g.rows().get(y as usize)?.get(x as usize).copied()
}

fn row_text(g: &Grid, y: usize) -> String {
    g.rows()[y].iter().map(|c| c.ch).collect()
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[test]
fn grid_starts_blank() {
    let g = Grid::new(5, 2);
    assert_eq!(g.rows().len(), 2);
    assert_eq!(row_text(&g, 0), "     ");
    assert_eq!(cell(&g, 4, 1), Some(Cell::BLANK));
    assert_eq!(cell(&g, 5, 0), None);
    assert_eq!(cell(&g, -1, 0), None);
}

#[test]
fn grid_put_str_clips_both_sides() {
    let mut g = Grid::new(5, 1);
    g.put_str(-2, 0, "abcd", None);
    assert_eq!(row_text(&g, 0), "cd   ");
    g.put_str(3, 0, "xyz", None);
    assert_eq!(row_text(&g, 0), "cd xy");
    g.put_str(0, 1, "zzz", None); // off the bottom
    g.put_str(0, -1, "zzz", None); // off the top
    assert_eq!(row_text(&g, 0), "cd xy");
}

// ── build_grid ────────────────────────────────────────────────────────────────

#[test]
fn grid_matches_playfield_size() {
    let g = build_grid(&make_state());
    assert_eq!(g.rows().len(), 20);
    assert!(g.rows().iter().all(|r| r.len() == 78));
}

#[test]
fn archer_drawn_at_column_zero_of_lane() {
    let mut s = make_state();
    s.archer = 4;
    let g = build_grid(&s);
    assert!(row_text(&g, 4).starts_with("|)"));
    assert_eq!(cell(&g, 0, 4).map(|c| c.color), Some(Some(C_ARCHER)));
    assert_eq!(row_text(&g, 10).trim(), "");
}

#[test]
fn active_arrow_drawn_inactive_skipped() {
    let mut s = make_state();
    s.arrows.push(Arrow { x: 10, y: 3, active: true });
    s.arrows.push(Arrow { x: 30, y: 3, active: false });
    let g = build_grid(&s);
    let row = row_text(&g, 3);
    assert_eq!(&row.chars().skip(10).take(2).collect::<String>(), ARROW_GLYPH);
    assert_eq!(cell(&g, 30, 3), Some(Cell::BLANK));
}

#[test]
fn arrow_at_right_edge_is_clipped() {
    let mut s = make_state();
    s.arrows.push(Arrow { x: 77, y: 0, active: true });
    let g = build_grid(&s);
    assert_eq!(cell(&g, 77, 0).map(|c| c.ch), Some('═'));
}

#[test]
fn balloon_drawn_cell_by_cell_in_its_colour() {
    let mut s = make_state();
    s.balloons.push(square_at(50, 5));
    let g = build_grid(&s);
    assert_eq!(cell(&g, 50, 5), Some(Cell { ch: '+', color: Some(Color::AnsiValue(39)) }));
    assert_eq!(cell(&g, 51, 6).map(|c| c.ch), Some(' '));
    assert_eq!(cell(&g, 53, 7).map(|c| c.ch), Some('+'));
}

#[test]
fn balloon_clipped_at_bottom_and_right() {
    let mut s = make_state();
    s.balloons.push(square_at(76, 18));
    let g = build_grid(&s);
    assert_eq!(cell(&g, 76, 18).map(|c| c.ch), Some('+'));
    assert_eq!(cell(&g, 77, 19).map(|c| c.ch), Some(' '));
    assert_eq!(g.rows().len(), 20);
    assert!(g.rows().iter().all(|r| r.len() == 78));
}

#[test]
fn balloon_partly_above_top_shows_lower_rows() {
    let mut s = make_state();
    s.balloons.push(square_at(50, -2));
    let g = build_grid(&s);
    assert_eq!(cell(&g, 50, 0).map(|c| c.ch), Some('+')); // third line
}

#[test]
fn popped_balloon_not_drawn() {
    let mut s = make_state();
    let mut b = square_at(50, 5);
    b.popped = true;
    s.balloons.push(b);
    let g = build_grid(&s);
    assert_eq!(cell(&g, 50, 5), Some(Cell::BLANK));
}

#[test]
fn explosion_drawn() {
    let mut s = make_state();
    s.explosions.push(Explosion { x: 40, y: 2, symbol: EXPLOSION_GLYPH, frames: 1 });
    let g = build_grid(&s);
    assert_eq!(cell(&g, 43, 4), Some(Cell { ch: '*', color: Some(C_EXPLOSION) }));
}

// ── compose_frame ─────────────────────────────────────────────────────────────

#[test]
fn frame_layout_top_to_bottom() {
    let mut s = make_state();
    s.score = 7;
    let f = compose_frame(&s);
    let text = f.to_plain_text();
    let lines: Vec<&str> = text.lines().collect();

    // title, blank, 22 panel rows, blank, score, blank, controls
    assert_eq!(lines.len(), 28);
    assert!(lines[0].contains(TITLE));
    assert!(lines[1].is_empty());
    assert!(lines[2].starts_with('╭') && lines[2].ends_with('╮'));
    assert!(lines[23].starts_with('╰') && lines[23].ends_with('╯'));
    assert!(lines[25].trim() == "Score: 7");
    assert!(lines[27].trim() == CONTROLS_HINT);
}

#[test]
fn frame_panel_rows_are_padded_and_bordered() {
    let f = compose_frame(&make_state());
    let text = f.to_plain_text();
    let lines: Vec<&str> = text.lines().collect();
    for row in &lines[3..23] {
        assert_eq!(row.chars().count(), 82);
        assert!(row.starts_with("│ ") && row.ends_with(" │"));
    }
    assert_eq!(f.width(), 82);
    // archer in lane 10 sits just inside the padding
    assert!(lines[3 + 10].starts_with("│ |)"));
}

#[test]
fn frame_text_blocks_centred() {
    let f = compose_frame(&make_state());
    let text = f.to_plain_text();
    let score = text.lines().nth(25).unwrap();
    let pad = score.len() - score.trim_start().len();
    assert_eq!(pad, (82 - "Score: 0".len()) / 2);
}

#[test]
fn frame_title_centred_by_cell_width() {
    // Each emoji occupies two cells, so the title is 20 cells wide.
    let f = compose_frame(&make_state());
    let text = f.to_plain_text();
    let title = text.lines().next().unwrap();
    let pad = title.len() - title.trim_start().len();
    assert_eq!(pad, (82 - 20) / 2);
}

#[test]
fn frame_styles_title_bold() {
    let f = compose_frame(&make_state());
    let title = f.lines[0].iter().find(|s| s.text == TITLE).unwrap();
    assert!(title.bold);
    assert_eq!(title.color, Some(C_TITLE));
}

#[test]
fn frame_is_pure() {
    let s = make_state();
    assert_eq!(compose_frame(&s).to_plain_text(), compose_frame(&s).to_plain_text());
}
