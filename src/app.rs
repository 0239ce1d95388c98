use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::action::{Action, Direction};
use crate::config::{Config, KeybindsConfig, format_key, parse_key};
use crate::dashboard::{Dashboard, TableId};
use crate::metrics::collector::{CollectorCommand, CollectorMessage, CollectorPoller};
use crate::metrics::rates::DiskRateTracker;
use crate::metrics::report::{MetricReport, parse_lines};
use crate::metrics::snapshot::MetricSnapshot;
use crate::refresh::RefreshRate;
use crate::table::ColumnMenuEntry;
use crate::ui::theme::{ColorSupport, Theme, resolve_color_support};

pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Overview,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Dashboard, Tab::Overview];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Overview => "Process Overview",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Overview => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Overview,
            Tab::Overview => Tab::Dashboard,
        }
    }

    pub fn table(self) -> TableId {
        match self {
            Tab::Dashboard => TableId::Dashboard,
            Tab::Overview => TableId::Overview,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    /// Header context menu for one column.
    HideColumn(usize),
    /// The `+` dropdown of hidden columns.
    ShowColumns,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMenu {
    pub kind: MenuKind,
    pub table: TableId,
    pub anchor: (u16, u16),
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
    Menu(OpenMenu),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub created: Instant,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub help: KeyCode,
    pub next_tab: KeyCode,
    pub cycle_theme: KeyCode,
    pub sort: KeyCode,
    pub hide_column: KeyCode,
    pub columns_menu: KeyCode,
    pub rate_up: KeyCode,
    pub rate_down: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            next_tab: parse_key(&kb.next_tab).unwrap_or(KeyCode::Tab),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            sort: parse_key(&kb.sort).unwrap_or(KeyCode::Char('s')),
            hide_column: parse_key(&kb.hide_column).unwrap_or(KeyCode::Char('h')),
            columns_menu: parse_key(&kb.columns_menu).unwrap_or(KeyCode::Char('+')),
            rate_up: parse_key(&kb.rate_up).unwrap_or(KeyCode::Char(']')),
            rate_down: parse_key(&kb.rate_down).unwrap_or(KeyCode::Char('[')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (format_key(self.quit), "Quit"),
            (format_key(self.help), "Toggle help"),
            (format_key(self.next_tab), "Next tab"),
            (format_key(self.cycle_theme), "Cycle theme"),
            (format_key(self.sort), "Sort by column"),
            (format_key(self.hide_column), "Hide column"),
            (format_key(self.columns_menu), "Show hidden columns"),
            (format_key(self.rate_up), "Slower refresh"),
            (format_key(self.rate_down), "Faster refresh"),
            (format_key(self.refresh), "Refresh now"),
            ("↑↓←→".to_string(), "Select row / column"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

/// Row selection and keyboard column cursor of one table.
#[derive(Debug, Default)]
pub struct TableView {
    pub state: TableState,
    pub column: usize,
}

/// Screen regions recorded by the last draw, used to route mouse input.
#[derive(Debug, Default, Clone)]
pub struct HitRegions {
    pub tabs: Vec<Rect>,
    pub slider: Option<Rect>,
    pub table: Option<TableHits>,
    pub menu_items: Vec<Rect>,
}

#[derive(Debug, Clone)]
pub struct TableHits {
    pub id: TableId,
    pub header_cells: Vec<(usize, Rect)>,
    pub columns_button: Rect,
    pub body: Rect,
    pub offset: usize,
}

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub keybinds: ResolvedKeybinds,
    pub snapshot: MetricSnapshot,
    pub dashboard: Dashboard,
    pub refresh_rate: RefreshRate,
    pub views: [TableView; 2],
    pub hits: HitRegions,
    pub status_message: Option<StatusMessage>,
    collector_command: Option<CollectorCommand>,
    poller: Option<CollectorPoller>,
    disk_rates: DiskRateTracker,
    pending_tick_rate: Option<Duration>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let color_support = resolve_color_support(&config.general.color_support);
        let theme = Theme::from_config(&config.general.theme, color_support);
        let snapshot = MetricSnapshot::placeholder();
        let dashboard = Dashboard::build(&config.gauges, &snapshot);
        let collector_command = config
            .collector
            .command
            .clone()
            .filter(|program| !program.trim().is_empty())
            .map(|program| CollectorCommand {
                program,
                args: config.collector.args.clone(),
            });

        Self {
            running: true,
            tab: Tab::Dashboard,
            input_mode: InputMode::Normal,
            theme,
            color_support,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            snapshot,
            dashboard,
            refresh_rate: RefreshRate::from_config(&config.general),
            views: [TableView::default(), TableView::default()],
            hits: HitRegions::default(),
            status_message: None,
            collector_command,
            poller: None,
            disk_rates: DiskRateTracker::new(),
            pending_tick_rate: None,
        }
    }

    /// Starts polling the configured collector, if any. Must be called
    /// inside the tokio runtime.
    pub fn start_collector(&mut self, tx: mpsc::UnboundedSender<CollectorMessage>) {
        let Some(command) = self.collector_command.clone() else {
            info!("no collector configured, showing placeholder data");
            return;
        };
        info!(program = %command.program, args = ?command.args, "polling collector");
        let mut poller = CollectorPoller::new(command, tx);
        poller.poll();
        self.poller = Some(poller);
    }

    pub fn has_collector(&self) -> bool {
        self.poller.is_some()
    }

    pub fn shutdown(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.shutdown();
        }
        info!("shutting down");
    }

    pub fn on_tick(&mut self) {
        self.expire_status(Instant::now());
        if let Some(poller) = self.poller.as_mut() {
            poller.poll();
        }
    }

    fn expire_status(&mut self, now: Instant) {
        if let Some(status) = &self.status_message
            && now.duration_since(status.created) >= STATUS_TTL
        {
            self.status_message = None;
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            level,
            created: Instant::now(),
        });
    }

    /// The tick period chosen since the last call, if it changed.
    pub fn take_tick_rate_change(&mut self) -> Option<Duration> {
        self.pending_tick_rate.take()
    }

    /// Handles one collector run. Returns `true` when the screen needs a redraw.
    pub fn apply_collector_message(&mut self, message: CollectorMessage) -> bool {
        match message {
            CollectorMessage::Output(output) => self.apply_collector_output(&output, Instant::now()),
            CollectorMessage::Failed(err) => {
                warn!(error = %err, "collector run failed");
                self.set_status(format!("Collector: {err}"), StatusLevel::Error);
                true
            }
        }
    }

    /// Applies every well-formed report in `output`; malformed lines are
    /// logged and leave the current values alone.
    pub fn apply_collector_output(&mut self, output: &str, now: Instant) -> bool {
        let mut applied = false;
        for result in parse_lines(output) {
            match result {
                Ok(report) => {
                    self.apply_report(&report, now);
                    applied = true;
                }
                Err(err) => warn!(error = %err, "ignoring collector report"),
            }
        }
        applied
    }

    pub fn apply_report(&mut self, report: &MetricReport, now: Instant) {
        let disk_rates = report.disk_rates.or_else(|| {
            report
                .disk_counters
                .and_then(|counters| self.disk_rates.observe(counters, now))
        });
        self.snapshot.apply(report, disk_rates);
        let changed = self.dashboard.apply_snapshot(&self.snapshot);
        for id in [TableId::Dashboard, TableId::Overview] {
            self.clamp_selection(id);
        }
        debug!(changed, cpu = self.snapshot.cpu_usage, "applied collector report");
    }

    pub fn active_table(&self) -> TableId {
        self.tab.table()
    }

    pub fn view(&self, id: TableId) -> &TableView {
        &self.views[id.index()]
    }

    pub fn view_mut(&mut self, id: TableId) -> &mut TableView {
        &mut self.views[id.index()]
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    /// Labels of the open menu with their enabled flag.
    pub fn menu_entries(&self, menu: &OpenMenu) -> Vec<(String, bool)> {
        let table = self.dashboard.table(menu.table);
        match menu.kind {
            MenuKind::HideColumn(column) => table
                .hide_action_label(column)
                .map(|label| vec![(label, true)])
                .unwrap_or_default(),
            MenuKind::ShowColumns => table
                .column_menu()
                .iter()
                .map(|entry| (entry.label().to_string(), entry.is_enabled()))
                .collect(),
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
            InputMode::Menu(_) => map_key_menu(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        match code {
            KeyCode::Up => return Action::Navigate(Direction::Up),
            KeyCode::Down => return Action::Navigate(Direction::Down),
            KeyCode::Left => return Action::Navigate(Direction::Left),
            KeyCode::Right => return Action::Navigate(Direction::Right),
            _ => {}
        }

        if code == kb.quit {
            Action::Quit
        } else if code == kb.help {
            Action::ToggleHelp
        } else if code == kb.next_tab {
            Action::NextTab
        } else if code == kb.cycle_theme {
            Action::CycleTheme
        } else if code == kb.sort {
            Action::SortSelected
        } else if code == kb.hide_column {
            Action::OpenHideMenu
        } else if code == kb.columns_menu {
            Action::OpenColumnsMenu
        } else if code == kb.rate_up {
            Action::RateUp
        } else if code == kb.rate_down {
            Action::RateDown
        } else if code == kb.refresh {
            Action::Refresh
        } else {
            Action::None
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        if key.code == self.keybinds.help || key.code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn map_mouse(&self, mouse: MouseEvent) -> Action {
        let pos = Position::new(mouse.column, mouse.row);
        match self.input_mode {
            InputMode::Help => match mouse.kind {
                MouseEventKind::Down(_) => Action::ToggleHelp,
                _ => Action::None,
            },
            InputMode::Menu(_) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self
                    .hits
                    .menu_items
                    .iter()
                    .position(|r| r.contains(pos))
                    .map(Action::MenuSelect)
                    .unwrap_or(Action::CloseMenu),
                MouseEventKind::Down(_) => Action::CloseMenu,
                _ => Action::None,
            },
            InputMode::Normal => self.map_mouse_normal(mouse.kind, pos),
        }
    }

    fn map_mouse_normal(&self, kind: MouseEventKind, pos: Position) -> Action {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.hits.tabs.iter().position(|r| r.contains(pos)) {
                    return Action::SelectTab(index);
                }
                if let Some(slider) = self.hits.slider
                    && slider.contains(pos)
                {
                    return Action::SetRefreshRate(self.rate_at(slider, pos.x));
                }
                let Some(table) = &self.hits.table else {
                    return Action::None;
                };
                if table.columns_button.contains(pos) {
                    return Action::OpenColumnsMenu;
                }
                if let Some((column, _)) =
                    table.header_cells.iter().find(|(_, r)| r.contains(pos))
                {
                    return Action::SortColumn(*column);
                }
                if table.body.contains(pos) {
                    return Action::SelectRow(table.offset + (pos.y - table.body.y) as usize);
                }
                Action::None
            }
            // Dragging keeps tracking along the slider row even past its ends.
            MouseEventKind::Drag(MouseButton::Left) => match self.hits.slider {
                Some(slider) if pos.y >= slider.y && pos.y < slider.bottom() => {
                    Action::SetRefreshRate(self.rate_at(slider, pos.x))
                }
                _ => Action::None,
            },
            MouseEventKind::Down(MouseButton::Right) => self
                .hits
                .table
                .as_ref()
                .and_then(|t| t.header_cells.iter().find(|(_, r)| r.contains(pos)))
                .map(|(column, _)| Action::OpenHideMenuAt(*column, pos.x, pos.y))
                .unwrap_or(Action::None),
            MouseEventKind::ScrollDown if self.in_table_body(pos) => {
                Action::Navigate(Direction::Down)
            }
            MouseEventKind::ScrollUp if self.in_table_body(pos) => Action::Navigate(Direction::Up),
            _ => Action::None,
        }
    }

    fn in_table_body(&self, pos: Position) -> bool {
        self.hits.table.as_ref().is_some_and(|t| t.body.contains(pos))
    }

    /// Refresh rate under column `x` of the slider track.
    pub fn rate_at(&self, slider: Rect, x: u16) -> u64 {
        let span = slider.width.saturating_sub(1);
        let fraction = if span == 0 {
            1.0
        } else {
            x.saturating_sub(slider.x) as f64 / span as f64
        };
        self.refresh_rate.at_fraction(fraction)
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(direction) => self.navigate(direction),
            Action::NextTab => self.tab = self.tab.next(),
            Action::SelectTab(index) => {
                if let Some(tab) = Tab::ALL.get(index) {
                    self.tab = *tab;
                }
            }
            Action::SelectRow(row) => {
                let id = self.active_table();
                if row < self.dashboard.table(id).row_count() {
                    self.view_mut(id).state.select(Some(row));
                }
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
                let name = self.theme.name;
                self.set_status(format!("Theme: {name}"), StatusLevel::Info);
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::SortSelected => {
                let id = self.active_table();
                let column = self.view(id).column;
                self.sort_column(id, column);
            }
            Action::SortColumn(column) => {
                let id = self.active_table();
                self.sort_column(id, column);
            }
            Action::OpenHideMenu => {
                let id = self.active_table();
                let column = self.view(id).column;
                if self.dashboard.table(id).is_hidden(column) {
                    return;
                }
                let anchor = self.header_anchor(column);
                self.open_menu(MenuKind::HideColumn(column), id, anchor);
            }
            Action::OpenHideMenuAt(column, x, y) => {
                let id = self.active_table();
                self.open_menu(MenuKind::HideColumn(column), id, (x, y));
            }
            Action::OpenColumnsMenu => {
                let id = self.active_table();
                let anchor = self
                    .hits
                    .table
                    .as_ref()
                    .map(|t| (t.columns_button.x, t.columns_button.bottom()))
                    .unwrap_or((0, 0));
                self.open_menu(MenuKind::ShowColumns, id, anchor);
            }
            Action::MenuMove(direction) => self.move_menu_cursor(direction),
            Action::MenuConfirm => {
                if let InputMode::Menu(menu) = self.input_mode {
                    self.activate_menu_entry(menu, menu.selected);
                }
            }
            Action::MenuSelect(index) => {
                if let InputMode::Menu(menu) = self.input_mode {
                    self.activate_menu_entry(menu, index);
                }
            }
            Action::CloseMenu => self.input_mode = InputMode::Normal,
            Action::RateUp => {
                if self.refresh_rate.step_up() {
                    self.on_rate_changed();
                }
            }
            Action::RateDown => {
                if self.refresh_rate.step_down() {
                    self.on_rate_changed();
                }
            }
            Action::SetRefreshRate(ms) => {
                if self.refresh_rate.set(ms) {
                    self.on_rate_changed();
                }
            }
            Action::Refresh => match self.poller.as_mut() {
                Some(poller) => {
                    poller.poll();
                }
                None => self.set_status("No collector configured", StatusLevel::Info),
            },
            Action::None => {}
        }
    }

    fn on_rate_changed(&mut self) {
        let ms = self.refresh_rate.millis();
        self.pending_tick_rate = Some(self.refresh_rate.duration());
        debug!(ms, "refresh rate changed");
        self.set_status(format!("Refresh every {ms} ms"), StatusLevel::Info);
    }

    fn sort_column(&mut self, id: TableId, column: usize) {
        let table = self.dashboard.table_mut(id);
        if column >= table.column_count() {
            return;
        }
        table.sort_by(column);
        self.view_mut(id).column = column;
    }

    fn header_anchor(&self, column: usize) -> (u16, u16) {
        self.hits
            .table
            .as_ref()
            .and_then(|t| t.header_cells.iter().find(|(c, _)| *c == column))
            .map(|(_, r)| (r.x, r.bottom()))
            .unwrap_or((0, 0))
    }

    fn open_menu(&mut self, kind: MenuKind, table: TableId, anchor: (u16, u16)) {
        if let MenuKind::HideColumn(column) = kind
            && column >= self.dashboard.table(table).column_count()
        {
            return;
        }
        self.input_mode = InputMode::Menu(OpenMenu {
            kind,
            table,
            anchor,
            selected: 0,
        });
    }

    fn move_menu_cursor(&mut self, direction: Direction) {
        let InputMode::Menu(mut menu) = self.input_mode else {
            return;
        };
        let count = self.menu_entries(&menu).len();
        if count == 0 {
            return;
        }
        menu.selected = match direction {
            Direction::Up => menu.selected.saturating_sub(1),
            Direction::Down => (menu.selected + 1).min(count - 1),
            Direction::Left | Direction::Right => menu.selected,
        };
        self.input_mode = InputMode::Menu(menu);
    }

    fn activate_menu_entry(&mut self, menu: OpenMenu, index: usize) {
        let table = self.dashboard.table_mut(menu.table);
        match menu.kind {
            MenuKind::HideColumn(column) => {
                if index == 0 && table.hide_column(column) {
                    debug!(column, "column hidden");
                    self.move_cursor_off_hidden(menu.table);
                }
            }
            MenuKind::ShowColumns => match table.column_menu().get(index) {
                Some(ColumnMenuEntry::Show { index: column, .. }) => {
                    table.show_column(*column);
                    debug!(column, "column shown");
                }
                Some(ColumnMenuEntry::NoneHidden) => return,
                None => {}
            },
        }
        self.input_mode = InputMode::Normal;
    }

    fn move_cursor_off_hidden(&mut self, id: TableId) {
        let visible = self.dashboard.table(id).visible_columns();
        let view = self.view_mut(id);
        if let Some(next) = visible
            .iter()
            .find(|&&c| c > view.column)
            .or_else(|| visible.last())
        {
            view.column = *next;
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let id = self.active_table();
        let rows = self.dashboard.table(id).row_count();
        let visible = self.dashboard.table(id).visible_columns();
        let view = self.view_mut(id);

        match direction {
            Direction::Up | Direction::Down => {
                if rows == 0 {
                    view.state.select(None);
                    return;
                }
                let next = match (view.state.selected(), direction) {
                    (None, _) => 0,
                    (Some(current), Direction::Up) => current.saturating_sub(1),
                    (Some(current), _) => (current + 1).min(rows - 1),
                };
                view.state.select(Some(next));
            }
            Direction::Left | Direction::Right => {
                let Some(pos) = visible
                    .iter()
                    .position(|&c| c == view.column)
                    .or_else(|| (!visible.is_empty()).then_some(0))
                else {
                    return;
                };
                let next = match direction {
                    Direction::Left => pos.saturating_sub(1),
                    _ => (pos + 1).min(visible.len() - 1),
                };
                view.column = visible[next];
            }
        }
    }

    fn clamp_selection(&mut self, id: TableId) {
        let rows = self.dashboard.table(id).row_count();
        let state = &mut self.view_mut(id).state;
        match state.selected() {
            Some(_) if rows == 0 => state.select(None),
            Some(selected) if selected >= rows => state.select(Some(rows - 1)),
            _ => {}
        }
    }
}

fn map_key_menu(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up => Action::MenuMove(Direction::Up),
        KeyCode::Down => Action::MenuMove(Direction::Down),
        KeyCode::Enter => Action::MenuConfirm,
        KeyCode::Esc => Action::CloseMenu,
        _ => Action::None,
    }
}
