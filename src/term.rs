use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use image::{imageops, GenericImageView, Pixel, Rgba};

use crate::error::{Error, Result};
use crate::state::Grid;
use crate::surface::{from_hex, Color, PixelCanvas, Surface};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Terminal columns used for one grid cell, so cells come out roughly square.
pub const COLUMNS_PER_CELL: TermInt = 2;

const BACKGROUND: Color = from_hex(0x1e1e1e);
const HALF_BLOCK: char = '▀';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Option<Color>,
    bg: Option<Color>,
}

impl Glyph {
    const BLANK: Glyph = Glyph::plain(' ');

    const fn plain(ch: char) -> Self {
        Glyph { ch, fg: None, bg: None }
    }
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    board: Coords,
    stdout: Stdout,
    screen: Vec<Glyph>,
    // Top-left corner and size of the message box on screen, if one is up
    message_area: Option<(Coords, Coords)>,
}

impl TermManager {
    /// Sizes the board for `grid`, failing if the terminal can't hold it.
    pub fn new(grid: Grid) -> Result<Self> {
        let board = board_size(grid)?;
        let (width, height) = terminal::size()?;

        let (need_width, need_height) = required_size(board)?;
        if width < need_width || height < need_height {
            return Err(Error::TerminalTooSmall { width, height, need_width, need_height });
        }

        let stdout = stdout();
        let screen = vec![Glyph::BLANK; width as usize * height as usize];
        Ok(TermManager { width, height, board, stdout, screen, message_area: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let end_x = self.board.0 + 1;
        let end_y = self.board.1 + 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), Glyph::plain(ch))?;
            self.print_at((x, end_y), Glyph::plain(ch))?;
        }

        for y in 1..end_y {
            self.print_at((0, y), Glyph::plain('|'))?;
            self.print_at((end_x, y), Glyph::plain('|'))?;
        }

        self.flush()
    }

    /// Shows the canvas inside the border, two pixel blocks per character.
    pub fn present(&mut self, canvas: &PixelCanvas) -> Result<()> {
        for row in 0..self.board.1 {
            for col in 0..self.board.0 {
                let (top, bottom) = block_colors(canvas, self.board, (col, row));
                let glyph = Glyph { ch: HALF_BLOCK, fg: Some(top), bg: Some(bottom) };
                self.print_at((col + 1, row + 1), glyph)?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    /// Status line under the board.
    pub fn draw_hud(&mut self, score_text: &str, start_label: &str) -> Result<()> {
        let line = format!(" {}   [Enter] {}   [q] Quit", score_text, start_label);
        let y = self.board.1 + 2;
        let width = self.width as usize;

        for (x, ch) in format!("{:<width$}", line, width = width).chars().take(width).enumerate() {
            self.print_at((x as TermInt, y), Glyph::plain(ch))?;
        }

        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.board.0 / 2 + 1, self.board.1 / 2 + 1);
        let (left, top) = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        for y in [top, top + msg_height - 1] {
            for x in left..left + msg_width {
                self.print_over((x, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().enumerate() {
                self.print_over((left + x_diff as TermInt, y), ch)?;
            }
        }

        self.message_area = Some(((left, top), (msg_width, msg_height)));
        self.flush()
    }

    /// Puts back whatever the message box was covering.
    pub fn hide_message(&mut self) -> Result<()> {
        let ((left, top), (msg_width, msg_height)) = match self.message_area.take() {
            Some(area) => area,
            None => return Ok(()),
        };

        for y in top..(top + msg_height).min(self.height) {
            for x in left..(left + msg_width).min(self.width) {
                let glyph = self.screen[self.width as usize * y as usize + x as usize];
                self.write_glyph((x, y), glyph)?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![Glyph::BLANK; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    pub fn has_message(&self) -> bool {
        self.message_area.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }

        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = glyph;
        self.write_glyph(pos, glyph)
    }

    /// Draws message text without touching the screen buffer, so it can be restored.
    fn print_over(&mut self, pos: Coords, ch: char) -> Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }

        queue!(self.stdout, style::ResetColor, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn write_glyph(&mut self, pos: Coords, glyph: Glyph) -> Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(pos.0, pos.1),
            style::SetForegroundColor(to_term_color(glyph.fg)),
            style::SetBackgroundColor(to_term_color(glyph.bg)),
            style::Print(glyph.ch)
        )?;
        Ok(())
    }
}

/// Board size in characters for `grid`, if it fits terminal coordinates at all.
pub fn board_size(grid: Grid) -> Result<Coords> {
    let too_big = || Error::InvalidConfig(format!(
        "{}x{} grid is too large for a terminal", grid.columns, grid.rows
    ));

    let columns = TermInt::try_from(grid.columns).map_err(|_| too_big())?;
    let rows = TermInt::try_from(grid.rows).map_err(|_| too_big())?;
    let width = columns.checked_mul(COLUMNS_PER_CELL).ok_or_else(too_big)?;

    let board = (width, rows);
    required_size(board).map_err(|_| too_big())?;
    Ok(board)
}

/// Terminal size needed for a board of `board` characters, counting the
/// border and the status line.
pub fn required_size(board: Coords) -> Result<Coords> {
    match (board.0.checked_add(2), board.1.checked_add(3)) {
        (Some(width), Some(height)) => Ok((width, height)),
        _ => Err(Error::InvalidConfig(format!("{}x{} board overflows the terminal", board.0, board.1))),
    }
}

fn to_term_color(color: Option<Color>) -> style::Color {
    match color {
        Some(Rgba([r, g, b, _])) => style::Color::Rgb { r, g, b },
        None => style::Color::Reset,
    }
}

/// Average colours of the upper and lower halves of the pixel block behind
/// character `cell` on a board of `board` characters.
fn block_colors(canvas: &PixelCanvas, board: Coords, cell: Coords) -> (Color, Color) {
    let (w, h) = (canvas.width(), canvas.height());
    let x0 = cell.0 as u32 * w / board.0 as u32;
    let x1 = (cell.0 as u32 + 1) * w / board.0 as u32;
    let y0 = cell.1 as u32 * h / board.1 as u32;
    let y1 = (cell.1 as u32 + 1) * h / board.1 as u32;
    let y_mid = (y0 + y1) / 2;

    (average(canvas, x0, y0, x1 - x0, y_mid - y0), average(canvas, x0, y_mid, x1 - x0, y1 - y_mid))
}

/// Mean colour of a canvas region, composited over the background.
fn average(canvas: &PixelCanvas, x: u32, y: u32, width: u32, height: u32) -> Color {
    let region = imageops::crop_imm(canvas.image(), x, y, width, height);
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);

    for (_, _, px) in region.pixels() {
        let mut p = BACKGROUND;
        p.blend(&px);
        r += p[0] as u32;
        g += p[1] as u32;
        b += p[2] as u32;
        n += 1;
    }

    if n == 0 {
        return BACKGROUND;
    }

    Rgba([(r / n) as u8, (g / n) as u8, (b / n) as u8, 255])
}
