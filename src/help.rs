use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

/// Placement of the help box as (x, y, width, height), centered on the screen
fn overlay_box(width: u16, height: u16, help_text: &str) -> (usize, usize, usize, usize) {
    let lines = help_text.lines().count();
    let max_width = help_text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let box_width = max_width + 4; // 2 chars padding each side
    let box_height = lines + 2; // border top/bottom

    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(box_height) / 2;
    (start_x, start_y, box_width, box_height)
}

/// Show a modal help overlay on top of the last frame.
/// Returns true if the user requested quit (q/Esc) while the overlay is open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    draw_overlay(width, height, help_text)?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore previous frame from back buffer.
    term.present()?;
    Ok(false)
}

fn draw_overlay(width: u16, height: u16, help_text: &str) -> io::Result<()> {
    let (x0, y0, box_width, box_height) = overlay_box(width, height, help_text);
    let inner = box_width - 4;
    let horizontal = "─".repeat(box_width - 2);

    let mut out = stdout();
    queue!(
        out,
        SetForegroundColor(Color::White),
        MoveTo(x0 as u16, y0 as u16),
        Print(format!("┌{}┐", horizontal))
    )?;

    for (i, line) in help_text.lines().enumerate() {
        let padding = inner.saturating_sub(line.chars().count());
        queue!(
            out,
            MoveTo(x0 as u16, (y0 + 1 + i) as u16),
            SetForegroundColor(Color::White),
            Print('│'),
            SetForegroundColor(Color::Grey),
            Print(format!(" {}{} ", line, " ".repeat(padding))),
            SetForegroundColor(Color::White),
            Print('│')
        )?;
    }

    queue!(
        out,
        MoveTo(x0 as u16, (y0 + box_height - 1) as u16),
        Print(format!("└{}┘", horizontal)),
        SetAttribute(Attribute::Reset),
        ResetColor
    )?;
    out.flush()
}
