//! Terminal setup, teardown and diffed drawing.

use std::io::{self, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::canvas::{char_width, Buffer, Rgb, TextStyle};

/// Owns the terminal while the app runs and restores it on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        // Restore the terminal before the default hook prints the panic
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Paints a frame with `paint` and writes only the cells that changed.
    pub fn draw<R>(&mut self, paint: impl FnOnce(&mut Buffer) -> R) -> io::Result<R> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current_buffer.clear();
        let result = paint(&mut self.current_buffer);
        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(result)
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        write_diff(&mut self.stdout, &self.current_buffer, &self.previous_buffer)?;
        self.stdout.flush()
    }
}

/// Writes the cells of `current` that differ from `previous`.
fn write_diff(out: &mut impl Write, current: &Buffer, previous: &Buffer) -> io::Result<()> {
    let mut last_x = u16::MAX;
    let mut last_y = u16::MAX;
    let mut last_char_width: u16 = 1;
    // Unknown after a reset: the terminal is on its own default colours
    let mut last_fg: Option<Rgb> = None;
    let mut last_bg: Option<Rgb> = None;
    let mut last_style = TextStyle::new();

    queue!(out, SetAttribute(Attribute::Reset))?;

    for (x, y, cell) in current.diff(previous) {
        if cell.wide_continuation {
            continue;
        }

        if y != last_y || x != last_x.wrapping_add(last_char_width) {
            queue!(out, cursor::MoveTo(x, y))?;
        }

        if last_fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_ct(cell.fg)))?;
            last_fg = Some(cell.fg);
        }
        if last_bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_ct(cell.bg)))?;
            last_bg = Some(cell.bg);
        }

        if cell.style != last_style {
            // Bold and dim share one reset, so rebuild from scratch
            queue!(
                out,
                SetAttribute(Attribute::Reset),
                SetForegroundColor(to_ct(cell.fg)),
                SetBackgroundColor(to_ct(cell.bg))
            )?;
            if cell.style.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if cell.style.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            if cell.style.italic {
                queue!(out, SetAttribute(Attribute::Italic))?;
            }
            if cell.style.underline {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            last_style = cell.style;
        }

        write!(out, "{}", cell.char)?;

        last_x = x;
        last_y = y;
        last_char_width = char_width(cell.char).max(1) as u16;
    }

    queue!(out, SetAttribute(Attribute::Reset))
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn to_ct(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn restore_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Cell;

    #[test]
    fn test_first_cell_always_sets_colours() {
        let previous = Buffer::new(2, 1);
        let mut current = Buffer::new(2, 1);
        current.set(0, 0, Cell::new('x').with_fg(Rgb::new(255, 255, 255)).with_bg(Rgb::new(0, 0, 0)));

        let mut out = Vec::new();
        write_diff(&mut out, &current, &previous).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("\x1b[38;2;255;255;255m"), "{out:?}");
        assert!(out.contains("\x1b[48;2;0;0;0m"), "{out:?}");
        assert!(out.contains('x'));
    }

    #[test]
    fn test_unchanged_buffer_writes_no_cells() {
        let buffer = Buffer::new(3, 2);
        let mut out = Vec::new();
        write_diff(&mut out, &buffer, &buffer.clone()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(!out.contains("38;2"));
    }
}
