use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::Widget;

use crate::action::Action;
use crate::app::{App, StatusLevel, Tab};
use crate::config::Config;
use crate::gauge::GaugeState;
use crate::gauge::color::Rgb;
use crate::ui::radial_gauge::RadialGauge;
use crate::ui::theme::{ColorSupport, Theme};

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn draw_app(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| super::draw(frame, app)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn test_app() -> App {
    let mut app = App::new(Config::default());
    app.theme = Theme::from_config("midnight", ColorSupport::Truecolor);
    app
}

fn render_gauge(state: &GaugeState, width: u16, height: u16) -> Buffer {
    let theme = Theme::from_config("midnight", ColorSupport::Truecolor);
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    RadialGauge::new(state, &theme).render(area, &mut buf);
    buf
}

fn is_blank(symbol: &str) -> bool {
    symbol == " " || symbol == "\u{2800}"
}

#[test]
fn dashboard_shows_placeholder_data() {
    let mut app = test_app();
    let screen = draw_app(&mut app, 120, 40);

    for expected in [
        "Dashboard",
        "Process Overview",
        "System Resource Monitor",
        "Refresh 1000 ms",
        "Energy",
        "CPU",
        "GPU",
        "Memory",
        "Network",
        "Disk I/O",
        "49%",
        "19%",
        "75%",
        "1000 MB/s",
        "3000 MB/s",
        "python",
        "chrome",
        "[+]",
    ] {
        assert!(screen.contains(expected), "missing {expected:?}\n{screen}");
    }
}

#[test]
fn draw_records_hit_regions() {
    let mut app = test_app();
    draw_app(&mut app, 120, 40);

    assert_eq!(app.hits.tabs.len(), 2);
    assert_eq!(app.hits.tabs[0].x, 0);
    assert!(app.hits.slider.is_some());
    let table = app.hits.table.as_ref().unwrap();
    let columns: Vec<usize> = table.header_cells.iter().map(|(c, _)| *c).collect();
    assert_eq!(columns, vec![0, 1, 2, 3]);
    assert!(app.hits.menu_items.is_empty());
}

#[test]
fn clicking_recorded_tab_switches_view() {
    let mut app = test_app();
    draw_app(&mut app, 120, 40);
    let tab = app.hits.tabs[1];
    app.dispatch(Action::SelectTab(1));
    assert_eq!(app.tab, Tab::Overview);
    assert!(tab.width > "Process Overview".len() as u16);

    let screen = draw_app(&mut app, 120, 40);
    assert!(screen.contains(" Process Overview "));
    assert!(!screen.contains("Refresh 1000 ms"));
    assert!(app.hits.slider.is_none());
}

#[test]
fn hidden_column_is_not_drawn() {
    let mut app = test_app();
    app.dispatch(Action::OpenHideMenuAt(1, 0, 0));
    app.dispatch(Action::MenuConfirm);

    let screen = draw_app(&mut app, 120, 40);
    assert!(!screen.contains("python"));
    assert!(screen.contains("1 hidden"));
    let table = app.hits.table.as_ref().unwrap();
    let columns: Vec<usize> = table.header_cells.iter().map(|(c, _)| *c).collect();
    assert_eq!(columns, vec![0, 2, 3]);
}

#[test]
fn sorted_header_shows_arrow() {
    let mut app = test_app();
    app.dispatch(Action::SortColumn(0));
    let screen = draw_app(&mut app, 120, 40);
    assert!(screen.contains("PID \u{25b2}"));
}

#[test]
fn context_menu_overlay_lists_hide_action() {
    let mut app = test_app();
    app.dispatch(Action::OpenHideMenuAt(1, 10, 30));
    let screen = draw_app(&mut app, 120, 40);
    assert!(screen.contains("Hide column 'Name'"));
    assert_eq!(app.hits.menu_items.len(), 1);
}

#[test]
fn empty_columns_menu_shows_disabled_entry() {
    let mut app = test_app();
    app.dispatch(Action::OpenColumnsMenu);
    let screen = draw_app(&mut app, 120, 40);
    assert!(screen.contains("(no hidden columns)"));
}

#[test]
fn help_overlay_lists_keybinds() {
    let mut app = test_app();
    app.dispatch(Action::ToggleHelp);
    let screen = draw_app(&mut app, 120, 40);
    assert!(screen.contains("Keybinds"));
    assert!(screen.contains("Show hidden columns"));
}

#[test]
fn status_message_replaces_pills() {
    let mut app = test_app();
    app.set_status("Collector: boom", StatusLevel::Error);
    let screen = draw_app(&mut app, 120, 40);
    let last_line = screen.lines().last().unwrap();
    assert!(last_line.contains("Collector: boom"));
}

#[test]
fn small_terminal_does_not_panic() {
    let mut app = test_app();
    draw_app(&mut app, 20, 6);
    draw_app(&mut app, 1, 1);
}

#[test]
fn gauge_label_is_centered() {
    let state = GaugeState::new(49, Rgb::new(255, 45, 113));
    let buf = render_gauge(&state, 20, 10);
    let label: String = (8..11).map(|x| buf[(x, 5)].symbol().to_string()).collect();
    assert_eq!(label, "49%");
}

#[test]
fn gauge_leaves_gap_at_bottom() {
    let state = GaugeState::new(100, Rgb::new(255, 45, 113));
    let buf = render_gauge(&state, 20, 10);
    assert!(!is_blank(buf[(10, 0)].symbol()), "top of the ring is drawn");
    assert!(is_blank(buf[(10, 9)].symbol()), "bottom center is open");
}

#[test]
fn gauge_fill_tracks_value() {
    let foreground = Color::Rgb(255, 45, 113);
    let count_fg = |buf: &Buffer| {
        buf.content()
            .iter()
            .filter(|cell| cell.fg == foreground && !is_blank(cell.symbol()))
            .count()
    };

    let empty = render_gauge(&GaugeState::new(0, Rgb::new(255, 45, 113)), 20, 10);
    let half = render_gauge(&GaugeState::new(50, Rgb::new(255, 45, 113)), 20, 10);
    let full = render_gauge(&GaugeState::new(100, Rgb::new(255, 45, 113)), 20, 10);

    assert_eq!(count_fg(&empty), 0);
    assert!(count_fg(&half) > 0);
    assert!(count_fg(&full) > count_fg(&half));
}

#[test]
fn gauge_in_tiny_area_only_draws_label() {
    let state = GaugeState::new(7, Rgb::new(255, 45, 113));
    let buf = render_gauge(&state, 3, 1);
    assert_eq!(buffer_to_string(&buf), "7% ");
}

#[test]
fn refresh_slider_draws_thick_track() {
    let mut app = test_app();
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| super::draw(frame, &mut app)).unwrap();

    let slider = app.hits.slider.unwrap();
    assert!(slider.width > 0);
    let buf = terminal.backend().buffer();
    for x in slider.x..slider.right() {
        assert_eq!(buf[(x, slider.y)].symbol(), "\u{2501}");
    }
    assert_eq!(buf[(slider.x, slider.y)].fg, app.theme.slider_filled);
    assert_eq!(buf[(slider.right() - 1, slider.y)].fg, app.theme.slider_unfilled);
}
