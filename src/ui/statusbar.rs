use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds, StatusLevel, StatusMessage};
use crate::config::format_key;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    keybinds: &ResolvedKeybinds,
    status_message: Option<&StatusMessage>,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some(status) = status_message {
        let color = match status.level {
            StatusLevel::Info => theme.status_ok,
            StatusLevel::Error => theme.status_err,
        };
        let line = Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    match input_mode {
        InputMode::Menu(_) => {
            spans.extend(pill_spans("\u{2191}\u{2193}".to_string(), "Choose", theme));
            spans.extend(pill_spans("Enter".to_string(), "Apply", theme));
            spans.extend(pill_spans("Esc".to_string(), "Close", theme));
        }
        InputMode::Help => {
            spans.extend(pill_spans(format_key(keybinds.help), "Close help", theme));
        }
        InputMode::Normal => {
            spans.extend(pill_spans(format_key(keybinds.quit), "Quit", theme));
            spans.extend(pill_spans(format_key(keybinds.next_tab), "Tab", theme));
            spans.extend(pill_spans(format_key(keybinds.sort), "Sort", theme));
            spans.extend(pill_spans(format_key(keybinds.hide_column), "Hide", theme));
            spans.extend(pill_spans(format_key(keybinds.columns_menu), "Columns", theme));
            spans.extend(pill_spans(
                format!("{}{}", format_key(keybinds.rate_down), format_key(keybinds.rate_up)),
                "Rate",
                theme,
            ));
            spans.extend(pill_spans(format_key(keybinds.cycle_theme), "Theme", theme));
            spans.extend(pill_spans(format_key(keybinds.help), "Help", theme));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: String, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
