use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

use crate::app::{TableHits, TableView};
use crate::dashboard::TableId;
use crate::format::truncate_unicode;
use crate::table::TableModel;
use crate::ui::theme::Theme;

pub const COLUMNS_BUTTON: &str = "[+]";
const COLUMN_SPACING: u16 = 1;

/// Draws one process table with its toolbar and returns the regions the
/// mouse can act on.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    id: TableId,
    model: &TableModel,
    view: &mut TableView,
    theme: &Theme,
) -> TableHits {
    let title = match id {
        TableId::Dashboard => " Processes ",
        TableId::Overview => " Process Overview ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.panel_bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [toolbar, table_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    let columns_button = render_toolbar(frame, toolbar, model, theme);

    let visible = model.visible_columns();
    let header_area = Rect {
        height: table_area.height.min(1),
        ..table_area
    };
    let body = Rect {
        y: table_area.y.saturating_add(1),
        height: table_area.height.saturating_sub(1),
        ..table_area
    };

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "All columns hidden",
                Style::default().fg(theme.text_secondary),
            )))
            .alignment(Alignment::Center),
            table_area,
        );
        return TableHits {
            id,
            header_cells: Vec::new(),
            columns_button,
            body: Rect::default(),
            offset: 0,
        };
    }

    let widths = vec![Constraint::Fill(1); visible.len()];
    let cell_rects = Layout::horizontal(widths.clone())
        .spacing(COLUMN_SPACING)
        .split(header_area);

    let header_style = Style::default()
        .fg(theme.table_header_fg)
        .bg(theme.table_header_bg)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        model
            .visible_headers()
            .into_iter()
            .zip(&visible)
            .map(|(label, &column)| {
                let mut style = Style::default();
                if column == view.column {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                Cell::from(label).style(style)
            }),
    )
    .style(header_style);

    let rows = model.visible_rows().into_iter().map(|cells| {
        Row::new(cells.into_iter().zip(cell_rects.iter()).map(|(text, rect)| {
            Cell::from(truncate_unicode(&text, rect.width as usize))
        }))
        .style(Style::default().fg(theme.text_primary))
    });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(
            Style::default()
                .bg(theme.row_highlight_bg)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(table, table_area, &mut view.state);

    TableHits {
        id,
        header_cells: visible.into_iter().zip(cell_rects.iter().copied()).collect(),
        columns_button,
        body,
        offset: view.state.offset(),
    }
}

/// Row count on the left, the hidden-columns button on the right.
fn render_toolbar(frame: &mut Frame, area: Rect, model: &TableModel, theme: &Theme) -> Rect {
    let hidden = model.hidden_columns().len();
    let mut summary = format!(" {} processes", model.row_count());
    if hidden > 0 {
        summary.push_str(&format!(", {hidden} hidden"));
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            summary,
            Style::default().fg(theme.text_secondary),
        )),
        area,
    );

    let width = (COLUMNS_BUTTON.len() as u16).min(area.width);
    let button = Rect {
        x: area.right().saturating_sub(width),
        width,
        ..area
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            COLUMNS_BUTTON,
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        )),
        button,
    );
    button
}
