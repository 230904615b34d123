//! Rendering layer: all terminal drawing lives here.
//!
//! [`TerminalCanvas`] implements the game's `Canvas` by scaling world
//! rectangles onto the character grid and queueing crossterm commands; the
//! whole frame goes out in one flush.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use alien_invasion::entities::{Alien, Bullet, Button, Rect, Ship};
use alien_invasion::render::Canvas;
use alien_invasion::scoreboard::Scoreboard;
use alien_invasion::settings::Rgb;
use alien_invasion::terminal::Viewport;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_SHIPS: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    pub viewport: Viewport,
    background: Color,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            background: Color::Reset,
        }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    fn print_at(&mut self, col: u16, row: u16, fg: Color, text: &str) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(fg))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    /// Print `text` right-aligned against the last column.
    fn print_right(&mut self, row: u16, fg: Color, text: &str) -> std::io::Result<()> {
        let col = self
            .viewport
            .cols
            .saturating_sub(text.chars().count() as u16 + 1);
        self.print_at(col, row, fg, text)
    }

    fn print_centered(&mut self, row: u16, fg: Color, text: &str) -> std::io::Result<()> {
        let col = (self.viewport.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.print_at(col, row, fg, text)
    }

    /// Fill the cells of `rect` row by row with the strings `shape` yields
    /// for (row index, row count, width in cells).
    fn draw_shape<F>(&mut self, rect: &Rect, fg: Color, shape: F) -> std::io::Result<()>
    where
        F: Fn(usize, usize, usize) -> String,
    {
        let Some((col0, row0, col1, row1)) = self.viewport.cells(rect) else {
            return Ok(());
        };
        let width = (col1 - col0 + 1) as usize;
        let rows = (row1 - row0 + 1) as usize;
        for (i, row) in (row0..=row1).enumerate() {
            let line = shape(i, rows, width);
            self.print_at(col0, row, fg, &line)?;
        }
        Ok(())
    }
}

/// `left` + `fill` × (width − 2) + `right`; narrow sprites collapse to fill.
fn sprite_row(width: usize, left: char, fill: char, right: char) -> String {
    if width < 3 {
        return fill.to_string().repeat(width);
    }
    let mut row = String::with_capacity(width * 3);
    row.push(left);
    row.extend(std::iter::repeat(fill).take(width - 2));
    row.push(right);
    row
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn fill(&mut self, rgb: Rgb) -> std::io::Result<()> {
        self.background = color(rgb);
        self.out.queue(style::SetBackgroundColor(self.background))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_bullet(&mut self, bullet: &Bullet, rgb: Rgb) -> std::io::Result<()> {
        self.draw_shape(&bullet.rect, color(rgb), |_, _, width| "║".repeat(width))
    }

    fn draw_ship(&mut self, ship: &Ship, rgb: Rgb) -> std::io::Result<()> {
        // Sprite:
        //    ▲       ← nose
        //  ◢███◣     ← hull, one row per remaining cell row
        self.draw_shape(&ship.rect, color(rgb), |row, _, width| {
            if row == 0 {
                let pad = width / 2;
                format!("{}▲{}", " ".repeat(pad), " ".repeat(width.saturating_sub(pad + 1)))
            } else {
                sprite_row(width, '◢', '█', '◣')
            }
        })
    }

    fn draw_alien(&mut self, alien: &Alien, rgb: Rgb) -> std::io::Result<()> {
        // Sprite:
        //  «▼▼▼»     ← head
        //  ▐█◉█▌     ← body
        //  ╚═══╝     ← legs
        self.draw_shape(&alien.rect, color(rgb), |row, rows, width| {
            if row == 0 {
                sprite_row(width, '«', '▼', '»')
            } else if row + 1 == rows {
                sprite_row(width, '╚', '═', '╝')
            } else {
                let mut body = sprite_row(width, '▐', '█', '▌');
                if width >= 3 {
                    let mid = width / 2;
                    body = body
                        .chars()
                        .enumerate()
                        .map(|(i, ch)| if i == mid { '◉' } else { ch })
                        .collect();
                }
                body
            }
        })
    }

    fn draw_scoreboard(&mut self, sb: &Scoreboard) -> std::io::Result<()> {
        // Score and level, right
        self.print_right(0, C_HUD_SCORE, &format!("Score {}", sb.score_text))?;
        self.print_right(1, C_HUD_LEVEL, &format!("Level {}", sb.level_text))?;

        // High score, centre
        self.print_centered(0, C_HUD_HIGH, &format!("High {}", sb.high_score_text))?;

        // Reserve ships, left
        let ships = "▲ ".repeat(sb.ships as usize);
        self.print_at(1, 0, C_HUD_SHIPS, ships.trim_end())?;
        Ok(())
    }

    fn draw_button(&mut self, button: &Button, rgb: Rgb, text_rgb: Rgb) -> std::io::Result<()> {
        let Some((col0, row0, col1, row1)) = self.viewport.cells(&button.rect) else {
            return Ok(());
        };
        let width = (col1 - col0 + 1) as usize;

        self.out.queue(style::SetBackgroundColor(color(rgb)))?;
        for row in row0..=row1 {
            self.print_at(col0, row, color(text_rgb), &" ".repeat(width))?;
        }
        let label: String = button.label.chars().take(width).collect();
        let label_col = col0 + ((width - label.chars().count()) / 2) as u16;
        let label_row = row0 + (row1 - row0) / 2;
        self.print_at(label_col, label_row, color(text_rgb), &label)?;
        self.out.queue(style::SetBackgroundColor(self.background))?;

        // Controls hint (last row)
        let hint_row = self.viewport.rows.saturating_sub(1);
        self.print_centered(
            hint_row,
            C_HINT,
            "Click Play or press Enter   ← → / A D : Move   SPACE : Shoot   Q : Quit",
        )
    }

    fn flip(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}
