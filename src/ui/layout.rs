use ratatui::layout::{Constraint, Layout, Rect};

pub const TAB_BAR_HEIGHT: u16 = 1;
pub const STATUS_BAR_HEIGHT: u16 = 1;
pub const HEADER_HEIGHT: u16 = 9;
pub const BIG5_HEIGHT: u16 = 12;
pub const BIG5_SPACING: u16 = 1;
pub const BIG5_PANELS: usize = 5;
pub const SLIDER_HEIGHT: u16 = 2;
pub const PANEL_LABEL_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub tabs: Rect,
    pub body: Rect,
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderAreas {
    pub spacer: Rect,
    pub title: Rect,
    pub slider: Rect,
    pub graph: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: HeaderAreas,
    pub panels: [Rect; BIG5_PANELS],
    pub table: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAreas {
    pub label: Rect,
    pub content: Rect,
}

pub fn split_screen(area: Rect) -> ScreenAreas {
    let [tabs, body, status] = Layout::vertical([
        Constraint::Length(TAB_BAR_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);
    ScreenAreas { tabs, body, status }
}

/// Header on top, the Big 5 row below it, and the process table taking
/// whatever height is left.
pub fn split_dashboard(area: Rect) -> DashboardAreas {
    let [header, big5, table] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(BIG5_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [spacer, title, right] = Layout::horizontal([Constraint::Fill(1); 3]).areas(header);
    let [slider, graph] =
        Layout::vertical([Constraint::Length(SLIDER_HEIGHT), Constraint::Fill(1)]).areas(right);

    let panels = Layout::horizontal([Constraint::Fill(1); BIG5_PANELS])
        .spacing(BIG5_SPACING)
        .areas(big5);

    DashboardAreas {
        header: HeaderAreas {
            spacer,
            title,
            slider,
            graph,
        },
        panels,
        table,
    }
}

/// Title line above the panel content.
pub fn split_panel(inner: Rect) -> PanelAreas {
    let [label, content] = Layout::vertical([
        Constraint::Length(PANEL_LABEL_HEIGHT),
        Constraint::Fill(1),
    ])
    .areas(inner);
    PanelAreas { label, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big5_panels_have_equal_widths() {
        let areas = split_dashboard(Rect::new(0, 0, 104, 40));
        for panel in areas.panels {
            assert_eq!(panel.width, 20);
            assert_eq!(panel.height, BIG5_HEIGHT);
        }
        assert_eq!(areas.panels[1].x - areas.panels[0].right(), BIG5_SPACING);
    }

    #[test]
    fn table_takes_remaining_height() {
        let areas = split_dashboard(Rect::new(0, 0, 120, 40));
        assert_eq!(areas.header.title.height, HEADER_HEIGHT);
        assert_eq!(areas.table.height, 40 - HEADER_HEIGHT - BIG5_HEIGHT);
        assert_eq!(areas.table.y, HEADER_HEIGHT + BIG5_HEIGHT);
    }

    #[test]
    fn header_splits_into_thirds_with_slider_over_graph() {
        let areas = split_dashboard(Rect::new(0, 0, 120, 40));
        let header = areas.header;
        assert_eq!(header.spacer.width, 40);
        assert_eq!(header.title.width, 40);
        assert_eq!(header.slider.x, 80);
        assert_eq!(header.slider.height, SLIDER_HEIGHT);
        assert_eq!(header.graph.y, SLIDER_HEIGHT);
        assert_eq!(header.graph.height, HEADER_HEIGHT - SLIDER_HEIGHT);
    }

    #[test]
    fn screen_reserves_tab_and_status_rows() {
        let screen = split_screen(Rect::new(0, 0, 80, 24));
        assert_eq!(screen.tabs, Rect::new(0, 0, 80, 1));
        assert_eq!(screen.status, Rect::new(0, 23, 80, 1));
        assert_eq!(screen.body.height, 22);
    }
}
