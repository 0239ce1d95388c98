use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

/// Popup list anchored at a screen cell, pushed back inside `screen` when it
/// would overflow. Returns one rect per entry for mouse hit-testing.
pub fn render(
    frame: &mut Frame,
    screen: Rect,
    anchor: (u16, u16),
    entries: &[(String, bool)],
    selected: usize,
    theme: &Theme,
) -> Vec<Rect> {
    let popup = popup_rect(screen, anchor, entries);
    if popup.is_empty() {
        return Vec::new();
    }
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.menu_bg));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut rects = Vec::with_capacity(entries.len());
    for (i, (label, enabled)) in entries.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.bottom() {
            break;
        }
        let row = Rect::new(inner.x, y, inner.width, 1);
        let mut style = if *enabled {
            Style::default().fg(theme.text_primary)
        } else {
            Style::default()
                .fg(theme.menu_disabled)
                .add_modifier(Modifier::ITALIC)
        };
        if i == selected && *enabled {
            style = style.bg(theme.accent).add_modifier(Modifier::BOLD);
        }
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(format!(" {label} "), style))),
            row,
        );
        rects.push(row);
    }
    rects
}

pub fn popup_rect(screen: Rect, anchor: (u16, u16), entries: &[(String, bool)]) -> Rect {
    let content_width = entries
        .iter()
        .map(|(label, _)| label.width() as u16 + 2)
        .max()
        .unwrap_or(0);
    let width = (content_width + 2).min(screen.width);
    let height = (entries.len() as u16 + 2).min(screen.height);

    let x = anchor.0.min(screen.right().saturating_sub(width)).max(screen.x);
    let y = anchor.1.min(screen.bottom().saturating_sub(height)).max(screen.y);
    Rect::new(x, y, width, height)
}
