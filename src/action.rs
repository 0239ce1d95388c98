#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    NextTab,
    SelectTab(usize),
    SelectRow(usize),
    CycleTheme,
    ToggleHelp,
    /// Sort the active table by the selected column.
    SortSelected,
    SortColumn(usize),
    /// Open the hide menu for the selected column.
    OpenHideMenu,
    /// Column plus the screen cell the menu opens at.
    OpenHideMenuAt(usize, u16, u16),
    OpenColumnsMenu,
    MenuMove(Direction),
    MenuConfirm,
    MenuSelect(usize),
    CloseMenu,
    RateUp,
    RateDown,
    SetRefreshRate(u64),
    Refresh,
    None,
}
