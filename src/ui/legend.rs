use super::{rgb, text_style, PAPER};
use crate::map::{MARKER_FILL, MAX_FIRES_FILL};
use crate::raster::Rgb;
use crate::scale::{intensity, linear_map, PLANTED_DOMAIN};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Rows of the fire gradient bar
const GRADIENT_ROWS: usize = 9;
/// Labelled fire counts, top to bottom
const FIRE_TICKS: [u32; 5] = [0, 6500, 13000, 19500, 26000];
/// Sample planted areas shown with their marker size
const PLANTED_SAMPLES: [u32; 3] = [15_000, 150_000, 1_500_000];

/// Lightest fill actually produced (zero fires)
fn lowest_fill() -> Rgb {
    Rgb::lerp(Rgb::WHITE, MAX_FIRES_FILL, intensity(0))
}

/// Legend sample diameters. Narrower than the map markers' [10, 70].
const LEGEND_DIAMETER_RANGE: (f64, f64) = (10.0, 60.0);

fn legend_diameter(area_ha: u32) -> i32 {
    linear_map(area_ha as f64, PLANTED_DOMAIN, LEGEND_DIAMETER_RANGE).trunc() as i32
}

/// Marker glyph growing with the legend diameter
fn marker_glyph(area_ha: u32) -> &'static str {
    match legend_diameter(area_ha) {
        d if d < 12 => "•",
        d if d < 40 => "●",
        _ => "⬤",
    }
}

/// Fire-count gradient and planted-area marker sizes
pub struct Legend;

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(" Number of fires:")];

        // one tick label every other row
        for row in 0..GRADIENT_ROWS {
            let t = (row * 255 / (GRADIENT_ROWS - 1)) as u8;
            let swatch = Rgb::lerp(lowest_fill(), MAX_FIRES_FILL, t);
            let mut spans = vec![
                Span::raw(" "),
                Span::styled("  ", Style::default().bg(rgb(swatch))),
            ];
            if row % 2 == 0 {
                if let Some(tick) = FIRE_TICKS.get(row / 2) {
                    spans.push(Span::styled(format!(" {tick}"), text_style()));
                }
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(" Planted forests area [ha]:"));
        for area_ha in PLANTED_SAMPLES {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(marker_glyph(area_ha), Style::default().fg(rgb(MARKER_FILL)).bg(PAPER)),
                Span::styled(format!("  {area_ha}"), text_style()),
            ]));
        }

        Paragraph::new(lines).style(text_style()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_starts_at_lowest_fill() {
        assert_eq!(lowest_fill(), Rgb(255, 245, 245));
    }

    #[test]
    fn test_legend_diameters_use_their_own_range() {
        assert_eq!(legend_diameter(13_901), 10);
        assert_eq!(legend_diameter(1_536_310), 60);
        assert!(legend_diameter(1_500_000) < crate::scale::marker_diameter(1_500_000));
    }

    #[test]
    fn test_marker_glyphs_grow() {
        assert_eq!(marker_glyph(15_000), "•");
        assert_eq!(marker_glyph(150_000), "●");
        assert_eq!(marker_glyph(1_500_000), "⬤");
    }

    #[test]
    fn test_renders_labels() {
        let area = Rect::new(0, 0, 30, 16);
        let mut buf = Buffer::empty(area);
        Legend.render(area, &mut buf);
        let text: String = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(text.contains("Number of fires:"));
        assert!(text.contains("26000"));
        assert!(text.contains("1500000"));
    }
}
