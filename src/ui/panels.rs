use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::dashboard::{Dashboard, RatePanel};
use crate::format::format_optional_rate;
use crate::gauge::GaugeState;
use crate::ui::layout::{BIG5_PANELS, split_panel};
use crate::ui::radial_gauge::RadialGauge;
use crate::ui::theme::Theme;

pub const PANEL_TITLES: [&str; BIG5_PANELS] = ["CPU", "GPU", "Memory", "Network", "Disk I/O"];

/// The Big 5 row: three gauges, then the network and disk readouts.
pub fn render(frame: &mut Frame, areas: &[Rect; BIG5_PANELS], dashboard: &Dashboard, theme: &Theme) {
    let gauges: [&GaugeState; 3] = [&dashboard.cpu, &dashboard.gpu, &dashboard.memory];
    for (i, area) in areas.iter().enumerate() {
        let content = panel_frame(frame, *area, PANEL_TITLES[i], theme);
        match i {
            0..=2 => frame.render_widget(RadialGauge::new(gauges[i], theme), content),
            3 => render_rates(
                frame,
                content,
                &dashboard.network,
                ("\u{2191} Upload", "\u{2193} Download"),
                theme.text_primary,
                theme,
            ),
            _ => render_rates(
                frame,
                content,
                &dashboard.disk,
                ("Read", "Write"),
                theme.disk_value,
                theme,
            ),
        }
    }
}

/// Bordered panel with its title line; returns the content area below it.
fn panel_frame(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = split_panel(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        parts.label,
    );
    parts.content
}

fn render_rates(
    frame: &mut Frame,
    area: Rect,
    panel: &RatePanel,
    labels: (&str, &str),
    value_color: Color,
    theme: &Theme,
) {
    let label_style = Style::default().fg(theme.text_secondary);
    let value_style = Style::default()
        .fg(value_color)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::default(); (area.height / 2).saturating_sub(2) as usize];
    lines.extend([
        Line::from(Span::styled(labels.0.to_string(), label_style)),
        Line::from(Span::styled(format_optional_rate(panel.first), value_style)),
        Line::default(),
        Line::from(Span::styled(labels.1.to_string(), label_style)),
        Line::from(Span::styled(format_optional_rate(panel.second), value_style)),
    ]);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
