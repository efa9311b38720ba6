/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::debug;

use crate::entities::{Action, Arrow, Balloon, Explosion, GameState, EXPLOSION_GLYPH};
use crate::spawn::{maybe_spawn, SCREEN_WIDTH};

// ── Rules ─────────────────────────────────────────────────────────────────────

pub const PLAY_WIDTH: i32 = SCREEN_WIDTH - 2; // padding
pub const PLAY_HEIGHT: i32 = 20;
pub const START_LANE: i32 = 10;

pub const MAX_ARROWS: usize = 3;
pub const ARROW_START_X: i32 = 2;
/// Columns an arrow travels per tick.
pub const ARROW_STEP: i32 = 2;
/// How far ahead of its tail an arrow's tip reaches for collisions.
pub const ARROW_REACH: i32 = 4;

/// Frames an explosion stays on screen after a hit.
pub const EXPLOSION_FRAMES: u32 = 1;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state on the fixed 78×20 playfield.
pub fn init_state(spawn_chance: f64) -> GameState {
    GameState {
        archer: START_LANE,
        arrows: Vec::new(),
        balloons: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        min_balloon_x: PLAY_WIDTH / 2,
        max_balloon_x: SCREEN_WIDTH - 7, // room for the balloon art
        spawn_chance,
        frame: 0,
        width: PLAY_WIDTH,
        height: PLAY_HEIGHT,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_archer_up(state: &GameState) -> GameState {
    GameState {
        archer: (state.archer - 1).max(0),
        ..state.clone()
    }
}

pub fn move_archer_down(state: &GameState) -> GameState {
    GameState {
        archer: (state.archer + 1).min(state.height - 1),
        ..state.clone()
    }
}

/// Loose an arrow from the archer's lane — capped at 3 in flight.
pub fn shoot(state: &GameState) -> GameState {
    if state.active_arrows() >= MAX_ARROWS {
        return state.clone();
    }
    let mut arrows = state.arrows.clone();
    arrows.push(Arrow {
        x: ARROW_START_X,
        y: state.archer,
        active: true,
    });
    GameState {
        arrows,
        ..state.clone()
    }
}

/// Route a player action to its transition.  `Quit` is handled by the
/// driver, so the state comes back unchanged.
pub fn apply_action(state: &GameState, action: Action) -> GameState {
    match action {
        Action::MoveUp => move_archer_up(state),
        Action::MoveDown => move_archer_down(state),
        Action::Shoot => shoot(state),
        Action::Quit => state.clone(),
    }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Does the arrow's point (reaching `ARROW_REACH` ahead) fall inside the
/// balloon's bounding box?  Both edges are inclusive.
pub fn arrow_hits(arrow: &Arrow, balloon: &Balloon) -> bool {
    arrow.x + ARROW_REACH >= balloon.x
        && arrow.x <= balloon.x + balloon.width
        && arrow.y >= balloon.y
        && arrow.y <= balloon.y + balloon.height
}

// ── Per-tick step (nearly pure — RNG is injected) ───────────────────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let frame = state.frame + 1;

    // ── 0. Age explosions from the previous tick ─────────────────────────────
    let mut explosions: Vec<Explosion> = state
        .explosions
        .iter()
        .filter(|e| e.frames > 1)
        .map(|e| Explosion {
            frames: e.frames - 1,
            ..e.clone()
        })
        .collect();

    // ── 1. Move arrows ───────────────────────────────────────────────────────
    let mut arrows: Vec<Arrow> = state
        .arrows
        .iter()
        .map(|a| {
            if !a.active {
                return a.clone();
            }
            let x = a.x + ARROW_STEP;
            Arrow {
                x,
                active: x < state.width,
                ..a.clone()
            }
        })
        .collect();

    // ── 2. Balloons rise and wobble ──────────────────────────────────────────
    let mut balloons: Vec<Balloon> = state
        .balloons
        .iter()
        .map(|b| {
            if b.popped {
                return b.clone();
            }
            let y = b.y - 1;
            let x = (b.x + rng.gen_range(-1..=1)).clamp(state.min_balloon_x, state.max_balloon_x);
            Balloon {
                x,
                y,
                // Escaped off the top
                popped: y < 0,
                ..b.clone()
            }
        })
        .collect();

    // ── 3. Collision: arrows ↔ balloons ──────────────────────────────────────
    let mut score_gain = 0;
    for arrow in arrows.iter_mut() {
        for balloon in balloons.iter_mut() {
            if !arrow.active {
                break;
            }
            if balloon.popped || !arrow_hits(arrow, balloon) {
                continue;
            }
            balloon.burst();
            arrow.active = false;
            score_gain += 1;
            explosions.push(Explosion {
                x: balloon.x,
                y: balloon.y,
                symbol: EXPLOSION_GLYPH,
                frames: EXPLOSION_FRAMES,
            });
            debug!(x = balloon.x, y = balloon.y, frame, "balloon popped");
        }
    }

    // ── 4. Cleanup ───────────────────────────────────────────────────────────
    arrows.retain(|a| a.active);
    balloons.retain(|b| !b.popped);

    // ── 5. Maybe spawn a new balloon at the bottom row ───────────────────────
    if let Some(balloon) = maybe_spawn(state.spawn_chance, SCREEN_WIDTH, state.height - 1, rng) {
        balloons.push(balloon);
    }

    GameState {
        arrows,
        balloons,
        explosions,
        score: state.score + score_gain,
        frame,
        ..state.clone()
    }
}
