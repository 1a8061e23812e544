use super::text::char_width;
use super::{Cell, Rect, Rgb, TextStyle};

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Fills `rect` with blanks on `bg`.
    pub fn fill(&mut self, rect: Rect, bg: Rgb) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, Cell::new(' ').with_bg(bg));
            }
        }
    }

    /// Writes `text` starting at `(x, y)`, keeping each cell's background.
    /// Stops at `max_x` (exclusive). Returns the x after the last glyph.
    pub fn draw_str(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        max_x: u16,
        fg: Rgb,
        style: TextStyle,
    ) -> u16 {
        let limit = max_x.min(self.width);
        let mut cx = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if cx.saturating_add(w) > limit {
                break;
            }
            let bg = self.get(cx, y).map(|c| c.bg).unwrap_or_default();
            self.set(cx, y, Cell::new(ch).with_fg(fg).with_bg(bg).with_style(style));
            for offset in 1..w {
                if let Some(cell) = self.get_mut(cx + offset, y) {
                    cell.wide_continuation = true;
                }
            }
            cx += w;
        }
        cx
    }

    /// Applies a style to every cell in `rect` without changing glyphs.
    pub fn restyle(&mut self, rect: Rect, f: impl Fn(&mut Cell)) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                if let Some(cell) = self.get_mut(x, y) {
                    f(cell);
                }
            }
        }
    }

    /// Text of one row, for inspection.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}
