use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::{self, Marker};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, LineGauge, Paragraph, Tabs,
};
use unicode_width::UnicodeWidthStr;

use crate::app::Tab;
use crate::dashboard::LineGraph;
use crate::refresh::RefreshRate;
use crate::ui::layout::HeaderAreas;
use crate::ui::theme::Theme;

pub const WINDOW_TITLE: &str = "System Resource Monitor";

/// Draws the tab strip and returns the clickable rect of each title.
pub fn render_tabs(frame: &mut Frame, area: Rect, selected: Tab, theme: &Theme) -> Vec<Rect> {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(selected.index())
        .style(Style::default().fg(theme.text_secondary).bg(theme.window_bg))
        .highlight_style(
            Style::default()
                .fg(theme.tab_active_fg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);

    // Default padding is one space each side, with a one-column divider.
    let mut x = area.x;
    let mut rects = Vec::with_capacity(Tab::ALL.len());
    for tab in Tab::ALL {
        let width = tab.title().width() as u16 + 2;
        let rect = Rect::new(x, area.y, width, area.height.min(1)).intersection(area);
        rects.push(rect);
        x = x.saturating_add(width + 1);
    }
    rects
}

/// Draws the dashboard header and returns the slider's clickable track.
pub fn render(
    frame: &mut Frame,
    areas: &HeaderAreas,
    graph: &LineGraph,
    rate: &RefreshRate,
    live: bool,
    theme: &Theme,
) -> Rect {
    let background = Block::default().style(Style::default().bg(theme.header_bg));
    frame.render_widget(background, areas.spacer);
    render_title(frame, areas.title, live, theme);
    let track = render_slider(frame, areas.slider, rate, theme);
    render_graph(frame, areas.graph, graph, theme);
    track
}

fn render_title(frame: &mut Frame, area: Rect, live: bool, theme: &Theme) {
    let source = if live { "live collector" } else { "placeholder data" };
    let mut lines = vec![Line::default(); (area.height / 2).saturating_sub(1) as usize];
    lines.push(Line::from(Span::styled(
        WINDOW_TITLE,
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        source,
        Style::default().fg(theme.text_secondary),
    )));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(theme.header_bg)),
        area,
    );
}

fn render_slider(frame: &mut Frame, area: Rect, rate: &RefreshRate, theme: &Theme) -> Rect {
    if area.height == 0 {
        return Rect::default();
    }
    let label = Line::from(vec![
        Span::styled(" Refresh ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("{} ms", rate.millis()),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let label_area = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(label).style(Style::default().bg(theme.header_bg)),
        label_area,
    );

    if area.height < 2 {
        return Rect::default();
    }
    let line_area = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    };
    let gauge = LineGauge::default()
        .ratio(rate.fraction())
        .label(Line::default())
        .filled_symbol(symbols::line::THICK.horizontal)
        .unfilled_symbol(symbols::line::THICK.horizontal)
        .filled_style(Style::default().fg(theme.slider_filled))
        .unfilled_style(Style::default().fg(theme.slider_unfilled))
        .style(Style::default().bg(theme.header_bg));
    frame.render_widget(gauge, line_area);

    // The line starts one column in, after the empty label.
    Rect {
        x: line_area.x.saturating_add(1),
        width: line_area.width.saturating_sub(1),
        ..line_area
    }
}

fn render_graph(frame: &mut Frame, area: Rect, graph: &LineGraph, theme: &Theme) {
    let points = graph.history.points();
    let x_max = (graph.history.len().max(2) - 1) as f64;
    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.gauge_color(graph.color)))
        .data(&points);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {} ", graph.source.title()),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let chart = Chart::new(vec![dataset])
        .block(block)
        .style(Style::default().bg(theme.panel_bg))
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds(graph.history.bounds()));
    frame.render_widget(chart, area);
}
