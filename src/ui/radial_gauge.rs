use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Painter, Shape};

use crate::gauge::GaugeState;
use crate::gauge::geometry::{ArcStroke, GaugeGeometry};
use crate::ui::theme::Theme;

/// Labels at or above this nominal size are drawn bold.
const BOLD_FONT_SIZE: u32 = 10;

/// Braille cells are 2 dots wide and 4 dots tall.
const DOTS_X: u32 = 2;
const DOTS_Y: u32 = 4;

struct ArcShape {
    stroke: ArcStroke,
    color: Color,
}

impl Shape for ArcShape {
    fn draw(&self, painter: &mut Painter) {
        for (x, y) in self.stroke.points() {
            if let Some((px, py)) = painter.get_point(x, y) {
                painter.paint(px, py, self.color);
            }
        }
    }
}

/// Ring gauge: a 270° track with the filled arc drawn over it and the
/// percentage centered inside.
pub struct RadialGauge<'a> {
    state: &'a GaugeState,
    foreground: Color,
    track: Color,
    text: Color,
    background: Color,
}

impl<'a> RadialGauge<'a> {
    pub fn new(state: &'a GaugeState, theme: &Theme) -> Self {
        Self {
            state,
            foreground: theme.gauge_color(state.foreground()),
            track: theme.gauge_color(state.track()),
            text: theme.text_primary,
            background: theme.panel_bg,
        }
    }
}

impl Widget for RadialGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let dots_w = area.width as u32 * DOTS_X;
        let dots_h = area.height as u32 * DOTS_Y;
        let geometry = GaugeGeometry::for_dimensions(dots_w, dots_h);

        if let Some(geometry) = geometry {
            let track = ArcShape {
                stroke: ArcStroke::track(&geometry),
                color: self.track,
            };
            let fill = ArcShape {
                stroke: ArcStroke::with_sweep(&geometry, self.state.sweep_degrees()),
                color: self.foreground,
            };
            Canvas::default()
                .marker(Marker::Braille)
                .background_color(self.background)
                .x_bounds([0.0, dots_w as f64])
                .y_bounds([0.0, dots_h as f64])
                .paint(|ctx| {
                    ctx.draw(&track);
                    ctx.layer();
                    ctx.draw(&fill);
                })
                .render(area, buf);
        }

        let label = self.state.label();
        let mut style = Style::default().fg(self.text).bg(self.background);
        if geometry.is_some_and(|g| g.font_size >= BOLD_FONT_SIZE) {
            style = style.add_modifier(Modifier::BOLD);
        }
        let label_width = label.len() as u16;
        let x = area.x + area.width.saturating_sub(label_width) / 2;
        let y = area.y + area.height / 2;
        buf.set_stringn(x, y, &label, area.width as usize, style);
    }
}
