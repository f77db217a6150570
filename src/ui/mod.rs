mod layout;
mod legend;

pub use layout::{Control, Hit, ScreenLayout};

use crate::app::App;
use crate::map::HIGHLIGHT_STROKE;
use crate::playback::PlaybackState;
use crate::raster::{Canvas, Rgb};
use crate::timeline::MONTH_NAMES;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

pub const DARK_GRAY: Color = Color::Rgb(127, 127, 127);
pub const LIGHT_PINK: Color = Color::Rgb(255, 205, 205);
pub const PAPER: Color = Color::Rgb(255, 255, 255);

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

fn text_style() -> Style {
    Style::default().fg(DARK_GRAY).bg(PAPER)
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let layout = &app.layout;
    frame.render_widget(Block::default().style(text_style()), frame.area());

    render_title(frame, app, layout.title);
    render_map(frame, app, layout.map);
    frame.render_widget(legend::Legend, layout.legend);
    render_details(frame, app, layout.details);
    frame.render_widget(Controls { app }, layout.controls);
    frame.render_widget(MonthTimeline { app }, layout.months);
    frame.render_widget(YearTimeline { app }, layout.years);
    render_status_bar(frame, app, layout.status);
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Fires vs planted forests in Brazil",
            text_style().add_modifier(Modifier::BOLD),
        )),
        Line::from(app.scene.time.label(app.playback.frame())),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).style(text_style()),
        area,
    );
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(text_style())
        .style(text_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(canvas) = app.display_frame() {
        frame.render_widget(MapWidget { canvas: &canvas }, inner);
    }
}

/// Draws an RGB buffer with upper half blocks: two pixels per cell
struct MapWidget<'a> {
    canvas: &'a Canvas,
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            let top = self.canvas.row(row as usize * 2);
            let bottom = self.canvas.row(row as usize * 2 + 1);
            for (col, &upper) in top.iter().enumerate().take(area.width as usize) {
                let lower = bottom.get(col).copied().unwrap_or(upper);
                buf[(area.x + col as u16, area.y + row)]
                    .set_char('▀')
                    .set_fg(rgb(upper))
                    .set_bg(rgb(lower));
            }
        }
    }
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = app.hovered() else {
        return;
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", detail.name, detail.code),
            Style::default().fg(rgb(HIGHLIGHT_STROKE)).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Number of fires: {}", detail.fire_count)),
    ];
    if detail.planted_area_ha != 0 {
        lines.push(Line::from(format!(
            "Planted forests area: {} ha",
            detail.planted_area_ha
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).style(text_style()),
        area,
    );
}

/// Write `text` at (x, area.y + dy), clipped to `area`
fn put(buf: &mut Buffer, area: Rect, x: u16, dy: u16, text: &str, style: Style) {
    if dy >= area.height || x < area.x || x >= area.right() {
        return;
    }
    buf.set_stringn(x, area.y + dy, text, (area.right() - x) as usize, style);
}

/// Pause / play / stop buttons
struct Controls<'a> {
    app: &'a App,
}

impl Widget for Controls<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hovered = self.app.hovered_hit();
        for control in Control::ALL {
            let rect = self.app.layout.button(control);
            let active = hovered == Some(Hit::Control(control))
                || self.app.pressed == Some(Hit::Control(control));
            let style = Style::default()
                .fg(PAPER)
                .bg(if active { LIGHT_PINK } else { DARK_GRAY });
            let icon = match control {
                Control::Pause => " ‖ ",
                Control::Play => " ▶ ",
                Control::Stop => " ■ ",
            };
            put(buf, area, rect.x, 0, icon, style);
        }
    }
}

/// Line with one dot per element; the current one filled
fn render_dots(buf: &mut Buffer, area: Rect, dy: u16, columns: &[u16], current: usize, hovered: Option<usize>) {
    let (Some(&first), Some(&last)) = (columns.first(), columns.last()) else {
        return;
    };
    for x in first..=last {
        put(buf, area, x, dy, "─", text_style());
    }
    for (i, &x) in columns.iter().enumerate() {
        let (glyph, color) = if i == current {
            ("●", LIGHT_PINK)
        } else if hovered == Some(i) {
            ("○", LIGHT_PINK)
        } else {
            ("○", DARK_GRAY)
        };
        put(buf, area, x, dy, glyph, Style::default().fg(color).bg(PAPER));
    }
}

struct MonthTimeline<'a> {
    app: &'a App,
}

impl Widget for MonthTimeline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = self.app.layout.month_columns();
        let (month, _) = self.app.playback.month_year();
        let hovered = match self.app.hovered_hit() {
            Some(Hit::Month(i)) => Some(i),
            _ => None,
        };
        render_dots(buf, area, 0, &columns, month as usize - 1, hovered);

        let spaced = columns.windows(2).all(|w| w[1] - w[0] >= 4);
        for (i, &x) in columns.iter().enumerate() {
            let label = if spaced { &MONTH_NAMES[i][..3] } else { &MONTH_NAMES[i][..1] };
            let x = x.saturating_sub(label.len() as u16 / 2).max(area.x);
            put(buf, area, x, 1, label, text_style());
        }
    }
}

struct YearTimeline<'a> {
    app: &'a App,
}

impl Widget for YearTimeline<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let time = &self.app.scene.time;
        let columns = self.app.layout.year_columns();
        let (_, year) = self.app.playback.month_year();
        let hovered = match self.app.hovered_hit() {
            Some(Hit::Year(i)) => Some(i),
            _ => None,
        };
        let label_at = |buf: &mut Buffer, i: usize, dy: u16| {
            if let Some(&x) = columns.get(i) {
                let text = (time.start_year() + i as i32).to_string();
                put(buf, area, x.saturating_sub(2).max(area.x), dy, &text, text_style());
            }
        };

        if let Some(i) = hovered {
            label_at(buf, i, 0);
        }
        render_dots(buf, area, 1, &columns, (year - time.start_year()) as usize, hovered);

        let mid = (time.mid_year() - time.start_year()) as usize;
        for i in [0, mid, columns.len().saturating_sub(1)] {
            label_at(buf, i, 2);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let state = match app.playback.state() {
        PlaybackState::Playing => Span::styled(" ▶ playing ", Style::default().fg(PAPER).bg(DARK_GRAY)),
        PlaybackState::Paused => Span::styled(" ‖ paused ", Style::default().fg(DARK_GRAY).bg(LIGHT_PINK)),
    };
    let status = Line::from(vec![
        state,
        Span::styled(
            " space:play/pause s:stop ←/→:month ↑/↓:year q:quit",
            text_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(status).style(text_style()), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Args, Config};
    use crate::test_support::scene;
    use clap::Parser;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        let config =
            Config::from_args(&Args::parse_from(["brazil-fires", "--start-year", "2006", "--end-year", "2007"]))
                .unwrap();
        App::new(scene(), &config, 100, 40)
    }

    #[test]
    fn test_renders_title_and_month() {
        let text = screen_text(&app());
        assert!(text.contains("Fires vs planted forests in Brazil"));
        assert!(text.contains("January 2006"));
        assert!(text.contains("paused"));
    }

    #[test]
    fn test_details_name_hovered_region() {
        let mut app = app();
        let p = app.view.viewport().to_buffer(glam::DVec2::new(4.0, 4.0));
        let inner = app.layout.map_inner;
        app.set_mouse_pos(inner.x + p.x as u16, inner.y + (p.y / 2.0) as u16);

        let text = screen_text(&app);
        assert!(text.contains("Acre (AC)"));
        assert!(text.contains("Number of fires: 120"));
        assert!(text.contains("Planted forests area: 150000 ha"));
    }
}
