/// Rendering layer — all terminal I/O lives here.
///
/// The camera frame (with the game overlay already composited in) is shown
/// as half-block cells: each terminal cell carries two vertically stacked
/// pixels via '▀' with independent foreground/background colors.  Menu
/// chrome and the HUD are drawn as plain terminal text on top.  No game
/// logic is performed; this module only translates state into terminal
/// commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Colors, Print},
    terminal, QueueableCommand,
};

use origami_invaders::entities::GameState;
use origami_invaders::menu::{Menu, Screen};
use origami_invaders::vision::Frame;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HULL: Color = Color::Red;
const C_OPTION: Color = Color::White;
const C_OPTION_SELECTED: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of output.
pub fn render<W: Write>(
    out: &mut W,
    frame: Option<&Frame>,
    state: &GameState,
    menu: &Menu,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    if cols < 20 || rows < 8 {
        return Ok(());
    }

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    // Row 0 is the HUD, the last row the key hints; the feed fills the rest.
    let view_top: u16 = 1;
    let view_rows = rows - 2;

    match frame {
        Some(frame) => {
            // Dim the feed whenever gameplay is not live so chrome stays legible.
            draw_frame_cells(out, frame, cols, view_top, view_rows, !menu.is_playing())?;
        }
        None => {
            print_centered(out, cols, rows / 2, "waiting for camera signal …", C_HINT)?;
        }
    }

    draw_hud(out, state, menu, cols)?;

    match menu.screen {
        Screen::Menu => draw_main_menu(out, menu, state, cols, rows)?,
        Screen::Options => draw_options(out, menu, cols, rows)?,
        Screen::GameOver => draw_game_over(out, menu, state, cols, rows)?,
        Screen::Playing => {
            if menu.paused {
                print_centered(out, cols, rows / 2, "║  PAUSED  ║", C_OPTION_SELECTED)?;
            }
        }
    }

    draw_hints(out, menu, rows)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Camera feed ───────────────────────────────────────────────────────────────

fn sample(frame: &Frame, x: u32, y: u32, dim: bool) -> Color {
    let (fw, fh) = frame.dimensions();
    let p = frame.get_pixel(x.min(fw - 1), y.min(fh - 1));
    let [mut r, mut g, mut b] = p.0;
    if dim {
        r /= 3;
        g /= 3;
        b /= 3;
    }
    Color::Rgb { r, g, b }
}

fn draw_frame_cells<W: Write>(
    out: &mut W,
    frame: &Frame,
    cols: u16,
    top: u16,
    view_rows: u16,
    dim: bool,
) -> std::io::Result<()> {
    let (fw, fh) = frame.dimensions();
    let px_rows = view_rows as u32 * 2;

    for row in 0..view_rows {
        out.queue(cursor::MoveTo(0, top + row))?;
        for col in 0..cols {
            let x = col as u32 * fw / cols as u32;
            let y_top = (row as u32 * 2) * fh / px_rows;
            let y_bot = (row as u32 * 2 + 1) * fh / px_rows;
            let fg = sample(frame, x, y_top, dim);
            let bg = sample(frame, x, y_bot, dim);
            out.queue(style::SetColors(Colors::new(fg, bg)))?;
            out.queue(Print('▀'))?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    menu: &Menu,
    cols: u16,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;

    if state.high_score > 0 {
        let best = format!("Best: {}", state.high_score);
        let cx = (cols / 2).saturating_sub(best.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(cx, 0))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(&best))?;
    }

    if menu.screen == Screen::Playing || menu.screen == Screen::GameOver {
        let hull = format!("Hull: {:>3}", state.ship.health.max(0));
        let rx = cols.saturating_sub(hull.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(rx, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_HULL))?;
        out.queue(Print(&hull))?;
    }

    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn print_centered<W: Write>(
    out: &mut W,
    cols: u16,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_option_list<W: Write>(
    out: &mut W,
    menu: &Menu,
    cols: u16,
    start_row: u16,
) -> std::io::Result<()> {
    for (i, label) in menu.option_labels().iter().enumerate() {
        let (marker, color) = if i == menu.selected {
            (">", C_OPTION_SELECTED)
        } else {
            (" ", C_OPTION)
        };
        let line = format!("{marker} {label}");
        print_centered(out, cols, start_row + i as u16 * 2, &line, color)?;
    }
    Ok(())
}

fn draw_main_menu<W: Write>(
    out: &mut W,
    menu: &Menu,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cy = rows / 2;

    print_centered(out, cols, cy.saturating_sub(6), "★  ORIGAMI  INVADERS  ★", C_TITLE)?;
    print_centered(
        out,
        cols,
        cy.saturating_sub(4),
        "Move a red object in front of the camera to steer the ship",
        C_HINT,
    )?;

    if state.high_score > 0 {
        let hs = format!("Best Score: {}", state.high_score);
        print_centered(out, cols, cy.saturating_sub(3), &hs, C_HUD_SCORE)?;
    }

    draw_option_list(out, menu, cols, cy.saturating_sub(1))
}

fn draw_options<W: Write>(
    out: &mut W,
    menu: &Menu,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cy = rows / 2;

    print_centered(out, cols, cy.saturating_sub(6), "DISPLAY  OPTIONS", C_TITLE)?;
    print_centered(
        out,
        cols,
        cy.saturating_sub(4),
        "Switching resolution reopens the camera",
        C_HINT,
    )?;

    draw_option_list(out, menu, cols, cy.saturating_sub(2))
}

fn draw_game_over<W: Write>(
    out: &mut W,
    menu: &Menu,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let cy = rows / 2;

    print_centered(out, cols, cy.saturating_sub(6), "╔══════════════════╗", C_GAME_OVER)?;
    print_centered(out, cols, cy.saturating_sub(5), "║    GAME  OVER    ║", C_GAME_OVER)?;
    print_centered(out, cols, cy.saturating_sub(4), "╚══════════════════╝", C_GAME_OVER)?;

    let score_line = format!("Final Score: {}", state.score);
    print_centered(out, cols, cy.saturating_sub(2), &score_line, C_HUD_SCORE)?;

    draw_option_list(out, menu, cols, cy)
}

// ── Key hints (last row) ──────────────────────────────────────────────────────

fn draw_hints<W: Write>(out: &mut W, menu: &Menu, rows: u16) -> std::io::Result<()> {
    let hint = match menu.screen {
        Screen::Playing => "← → : Nudge   P : Pause   Q : Quit",
        Screen::Options => "↑ ↓ : Select   ENTER : Apply   ESC : Back   Q : Quit",
        _ => "↑ ↓ : Select   ENTER : Confirm   Q : Quit",
    };
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
