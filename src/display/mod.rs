//! Rendering layer — all terminal I/O lives here.
//!
//! `TerminalView` implements the three output capabilities over crossterm.
//! Commands are queued into the writer as the simulation draws; `present`
//! adds the HUD and end-of-game overlay, then flushes.  The playfield is
//! scaled from game units onto whatever grid the terminal currently has.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color as TermColor, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{Color, GameStatus, Rect};
use crate::render::{OutcomeSink, ScoreSink, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: TermColor = TermColor::Yellow;
const C_HINT: TermColor = TermColor::DarkGrey;
const C_WIN: TermColor = TermColor::Green;
const C_LOSS: TermColor = TermColor::Red;

const CELL: &str = "█";

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Lime => TermColor::Green,
        Color::White => TermColor::White,
        Color::Red => TermColor::Red,
        Color::Yellow => TermColor::Yellow,
        Color::Cyan => TermColor::Cyan,
        Color::Magenta => TermColor::Magenta,
    }
}

// ── View ──────────────────────────────────────────────────────────────────────

pub struct TerminalView<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    field_width: f32,
    field_height: f32,
    score: u32,
    outcome: Option<(GameStatus, String)>,
    /// First error hit while queueing; reported by `present`.
    error: Option<io::Error>,
}

impl<W: Write> TerminalView<W> {
    /// `field_*` is the playfield size in game units, `cols × rows` the
    /// terminal size.  Row 0 holds the HUD and the last row the key hints.
    pub fn new(out: W, field_width: f32, field_height: f32, cols: u16, rows: u16) -> Self {
        TerminalView {
            out,
            cols,
            rows,
            field_width,
            field_height,
            score: 0,
            outcome: None,
            error: None,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let result = self
            .out
            .queue(terminal::Clear(terminal::ClearType::All))
            .map(|_| ());
        self.record(result);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw the HUD (and overlay, once the game is over) and flush.
    pub fn present(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.draw_hud()?;
        self.draw_controls_hint()?;
        if let Some((status, message)) = self.outcome.clone() {
            self.draw_outcome(status, &message)?;
        }

        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            if self.error.is_none() {
                self.error = Some(err);
            }
        }
    }

    /// Map a game-space rectangle to a half-open cell range `(c0, c1, r0, r1)`
    /// inside the play area.  Anything visible covers at least one cell.
    fn cells(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let cols = self.cols as f32;
        let rows = self.play_rows() as f32;
        if cols < 1.0 || rows < 1.0 {
            return None;
        }
        let sx = cols / self.field_width;
        let sy = rows / self.field_height;

        let c0 = (rect.x * sx).floor().max(0.0);
        let r0 = (rect.y * sy).floor().max(0.0);
        if c0 >= cols || r0 >= rows || rect.right() <= 0.0 || rect.bottom() <= 0.0 {
            return None;
        }
        let c1 = (rect.right() * sx).ceil().max(c0 + 1.0).min(cols);
        let r1 = (rect.bottom() * sy).ceil().max(r0 + 1.0).min(rows);
        Some((c0 as u16, c1 as u16, r0 as u16, r1 as u16))
    }

    fn fill_cells(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        let Some((c0, c1, r0, r1)) = self.cells(rect) else {
            return Ok(());
        };
        let run = CELL.repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        for row in r0..r1 {
            // +1 skips the HUD row
            self.out.queue(cursor::MoveTo(c0, row + 1))?;
            self.out.queue(Print(&run))?;
        }
        Ok(())
    }

    // ── HUD (row 0) ───────────────────────────────────────────────────────────

    fn draw_hud(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, 0))?;
        self.out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        self.out.queue(Print(format!("Score:{:>6}", self.score)))?;
        Ok(())
    }

    // ── Controls hint (last row) ──────────────────────────────────────────────

    fn draw_controls_hint(&mut self) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print("← → : Move   SPACE : Shoot   Q : Quit"))?;
        Ok(())
    }

    // ── End-of-game overlay ───────────────────────────────────────────────────

    fn draw_outcome(&mut self, status: GameStatus, message: &str) -> io::Result<()> {
        let color = match status {
            GameStatus::Won => C_WIN,
            _ => C_LOSS,
        };
        let inner = 20;
        let top = format!("╔{}╗", "═".repeat(inner));
        let middle = format!("║{:^inner$}║", message);
        let bottom = format!("╚{}╝", "═".repeat(inner));
        let score_line = format!("Final Score: {:>6}", self.score);
        let hint = "R - Play Again  Q - Quit";

        let lines: [(&str, TermColor); 5] = [
            (top.as_str(), color),
            (middle.as_str(), color),
            (bottom.as_str(), color),
            (score_line.as_str(), C_HUD_SCORE),
            (hint, TermColor::White),
        ];

        let cx = self.cols / 2;
        let start_row = (self.rows / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, (text, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(text.chars().count() as u16 / 2);
            self.out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            self.out.queue(style::SetForegroundColor(*color))?;
            self.out.queue(Print(*text))?;
        }
        Ok(())
    }
}

impl<W: Write> Surface for TerminalView<W> {
    fn clear(&mut self) {
        let result = self
            .out
            .queue(terminal::Clear(terminal::ClearType::All))
            .map(|_| ());
        self.record(result);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let result = self.fill_cells(rect, color);
        self.record(result);
    }
}

impl<W: Write> ScoreSink for TerminalView<W> {
    fn show_score(&mut self, score: u32) {
        self.score = score;
    }
}

impl<W: Write> OutcomeSink for TerminalView<W> {
    fn show_outcome(&mut self, status: GameStatus, message: &str) {
        self.outcome = Some((status, message.to_string()));
    }

    fn hide_outcome(&mut self) {
        self.outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TerminalView<Vec<u8>> {
        // 60 × 62 terminal → 60 × 60 play cells, 10 game units per cell
        TerminalView::new(Vec::new(), 600.0, 600.0, 60, 62)
    }

    #[test]
    fn rect_maps_to_scaled_cells() {
        let v = view();
        assert_eq!(v.cells(Rect::new(50.0, 30.0, 40.0, 30.0)), Some((5, 9, 3, 6)));
    }

    #[test]
    fn thin_rect_covers_one_cell() {
        let v = view();
        let (c0, c1, r0, r1) = v.cells(Rect::new(301.0, 100.0, 5.0, 5.0)).unwrap();
        assert_eq!(c1 - c0, 1);
        assert_eq!(r1 - r0, 1);
    }

    #[test]
    fn offscreen_rect_is_skipped() {
        let v = view();
        assert_eq!(v.cells(Rect::new(700.0, 10.0, 40.0, 30.0)), None);
        assert_eq!(v.cells(Rect::new(10.0, -20.0, 5.0, 10.0)), None);
    }

    #[test]
    fn present_includes_score_and_outcome() {
        let mut v = view();
        v.show_score(40);
        v.show_outcome(GameStatus::Won, "You Win!");
        v.present().unwrap();
        let text = String::from_utf8_lossy(&v.into_inner()).into_owned();
        assert!(text.contains("Score:    40"));
        assert!(text.contains("You Win!"));
        assert!(text.contains("Final Score:     40"));
    }

    #[test]
    fn hidden_outcome_is_not_drawn() {
        let mut v = view();
        v.show_outcome(GameStatus::Lost, "Game Over");
        v.hide_outcome();
        v.present().unwrap();
        let text = String::from_utf8_lossy(&v.into_inner()).into_owned();
        assert!(!text.contains("Game Over"));
    }
}
