use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Width of the legend column
const LEGEND_WIDTH: u16 = 30;
/// Widest gap between timeline dots
const MAX_DOT_SPACING: u16 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Pause,
    Play,
    Stop,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Pause, Control::Play, Control::Stop];
}

/// A clickable element under the mouse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Control(Control),
    Month(usize),
    Year(usize),
}

/// Screen regions, computed the same way for drawing and for mouse hit-testing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    /// Bordered map panel
    pub map: Rect,
    /// Map panel interior; one cell shows two stacked buffer pixels
    pub map_inner: Rect,
    pub legend: Rect,
    pub details: Rect,
    pub controls: Rect,
    /// Dots on the first row, labels on the second
    pub months: Rect,
    /// Hover label, dots, then start/mid/end labels
    pub years: Rect,
    pub status: Rect,
    num_years: usize,
}

impl ScreenLayout {
    pub fn new(area: Rect, num_years: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Min(6),    // Map + legend
                Constraint::Length(3), // Details
                Constraint::Length(1), // Controls
                Constraint::Length(2), // Month timeline
                Constraint::Length(3), // Year timeline
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)])
            .split(rows[1]);

        Self {
            title: rows[0],
            map: body[0],
            map_inner: Block::default().borders(Borders::ALL).inner(body[0]),
            legend: body[1],
            details: rows[2],
            controls: rows[3],
            months: rows[4],
            years: rows[5],
            status: rows[6],
            num_years,
        }
    }

    /// Offscreen buffer size backing the map panel
    pub fn map_pixels(&self) -> (usize, usize) {
        (self.map_inner.width as usize, self.map_inner.height as usize * 2)
    }

    /// Top buffer pixel under a terminal cell; the cell also shows the pixel
    /// below it. May fall outside the buffer; callers sample with a
    /// bounds-checked read.
    pub fn map_pixel_at(&self, col: u16, row: u16) -> (i32, i32) {
        let x = col as i32 - self.map_inner.x as i32;
        let y = (row as i32 - self.map_inner.y as i32) * 2;
        (x, y)
    }

    pub fn button(&self, control: Control) -> Rect {
        let center = self.controls.x + self.controls.width / 2;
        let x = match control {
            Control::Pause => center.saturating_sub(5),
            Control::Play => center.saturating_sub(1),
            Control::Stop => center + 3,
        };
        Rect::new(x, self.controls.y, 3, self.controls.height.min(1)).intersection(self.controls)
    }

    pub fn month_columns(&self) -> Vec<u16> {
        dot_columns(self.months, 12)
    }

    pub fn year_columns(&self) -> Vec<u16> {
        dot_columns(self.years, self.num_years)
    }

    pub fn month_dot_row(&self) -> u16 {
        self.months.y
    }

    pub fn year_dot_row(&self) -> u16 {
        self.years.y + 1
    }

    /// Clickable element at a terminal cell
    pub fn hit_test(&self, col: u16, row: u16) -> Option<Hit> {
        for control in Control::ALL {
            let rect = self.button(control);
            if rect.contains((col, row).into()) {
                return Some(Hit::Control(control));
            }
        }
        if self.months.height > 0 && row == self.month_dot_row() {
            if let Some(i) = nearest_dot(&self.month_columns(), col) {
                return Some(Hit::Month(i));
            }
        }
        if self.years.height > 1 && row == self.year_dot_row() {
            if let Some(i) = nearest_dot(&self.year_columns(), col) {
                return Some(Hit::Year(i));
            }
        }
        None
    }
}

/// Centered, evenly spaced dot columns
fn dot_columns(area: Rect, n: usize) -> Vec<u16> {
    if n == 0 || area.width == 0 {
        return Vec::new();
    }
    let gaps = (n - 1).max(1) as u16;
    let spacing = (area.width.saturating_sub(1) / gaps).clamp(1, MAX_DOT_SPACING);
    let span = spacing * (n as u16 - 1);
    let start = area.x + area.width.saturating_sub(span) / 2;
    (0..n as u16).map(|i| start + i * spacing).collect()
}

/// Index of the dot at `col`, allowing one cell of slack when dots are spaced out
fn nearest_dot(columns: &[u16], col: u16) -> Option<usize> {
    let slack = match columns {
        [a, b, ..] if b - a >= 3 => 1,
        _ => 0,
    };
    columns
        .iter()
        .position(|&c| col + slack >= c && col <= c + slack)
}
