pub mod header;
pub mod help;
pub mod layout;
pub mod menu;
pub mod panels;
pub mod process_table;
pub mod radial_gauge;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::app::{App, HitRegions, InputMode, Tab};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.window_bg)),
        area,
    );

    let screen = layout::split_screen(area);
    let mut hits = HitRegions {
        tabs: header::render_tabs(frame, screen.tabs, app.tab, &app.theme),
        ..HitRegions::default()
    };

    let id = app.active_table();
    match app.tab {
        Tab::Dashboard => {
            let areas = layout::split_dashboard(screen.body);
            hits.slider = Some(header::render(
                frame,
                &areas.header,
                &app.dashboard.graph,
                &app.refresh_rate,
                app.has_collector(),
                &app.theme,
            ));
            panels::render(frame, &areas.panels, &app.dashboard, &app.theme);
            hits.table = Some(process_table::render(
                frame,
                areas.table,
                id,
                app.dashboard.table(id),
                &mut app.views[id.index()],
                &app.theme,
            ));
        }
        Tab::Overview => {
            hits.table = Some(process_table::render(
                frame,
                screen.body,
                id,
                app.dashboard.table(id),
                &mut app.views[id.index()],
                &app.theme,
            ));
        }
    }

    statusbar::render(
        frame,
        screen.status,
        app.input_mode,
        &app.keybinds,
        app.status_message.as_ref(),
        &app.theme,
    );

    // Overlays last so they sit on top
    match app.input_mode {
        InputMode::Menu(open) => {
            let entries = app.menu_entries(&open);
            hits.menu_items = menu::render(
                frame,
                area,
                open.anchor,
                &entries,
                open.selected,
                &app.theme,
            );
        }
        InputMode::Help => help::render(frame, area, &app.help_entries(), &app.theme),
        InputMode::Normal => {}
    }

    app.hits = hits;
}

#[cfg(test)]
mod tests;
