//! Rendering layer — all terminal I/O lives here.
//!
//! `paint` receives a mutable writer and an already-composed `Frame`.
//! No game logic is performed; this module only translates styled lines
//! into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Print},
    terminal, QueueableCommand,
};
use balloon_archer::render::{Frame, Span};

/// Switch to the alternate screen and hide the cursor.
pub fn enter<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.flush()
}

/// Undo `enter`.
pub fn restore<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()
}

/// Prepare the screen before the first frame.
pub fn clear<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.flush()
}

/// Paint one complete frame from the top-left corner.
///
/// Each row is overwritten in place and the remainder of the line cleared,
/// so nothing from the previous frame survives without a full-screen clear.
pub fn paint<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    for (row, line) in frame.lines.iter().enumerate() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        for span in line {
            draw_span(out, span)?;
        }
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    }
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;

    // Park cursor below the frame and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.lines.len() as u16))?;
    out.flush()?;
    Ok(())
}

fn draw_span<W: Write>(out: &mut W, span: &Span) -> std::io::Result<()> {
    match span.color {
        Some(color) => out.queue(style::SetForegroundColor(color))?,
        None => out.queue(style::ResetColor)?,
    };
    if span.bold {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    out.queue(Print(&span.text))?;
    if span.bold {
        out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
    }
    Ok(())
}
