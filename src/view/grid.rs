//! Holdings grid widget.
//!
//! Renders [`RowSlot`]s from the view-state layer into a ratatui table whose
//! column widths come from the same [`ColumnLayout`] the mouse handler uses.

use super::constants::{GRID_HEADER_ROWS, IMAGE_GLYPH, PLACEHOLDER_GLYPH};
use super::styles::TableStyles;
use crate::state::{AccumulationMode, AppState, LoadStatus};
use crate::view_state::{
    grid_rows, ColumnKind, ColumnLayout, ImageGlyph, RowCells, RowSlot, COLUMN_SPACING,
};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Label of the send affordance.
pub const SEND_LABEL: &str = "[ Send ]";

/// Render the grid or, when there is nothing to show, the load status.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &TableStyles,
) -> ColumnLayout {
    let granted = state.is_granted();
    let inner_width = area.width.saturating_sub(2);
    let link_titles: Vec<&str> = state
        .links
        .for_chain(state.chain_id)
        .iter()
        .map(|t| t.title())
        .collect();
    let columns = ColumnLayout::compute(
        inner_width,
        state.options.enable_batch_select,
        &link_titles,
        granted,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(grid_title(state));

    match state.accumulator.status() {
        LoadStatus::Loading => {
            render_message(frame, area, block, vec![Line::from("Loading NFTs…")], styles.placeholder);
        }
        LoadStatus::Empty => {
            render_message(
                frame,
                area,
                block,
                vec![Line::from("No NFTs available or none detected")],
                styles.placeholder,
            );
        }
        LoadStatus::Failed(err) => {
            let lines = vec![
                Line::from(Span::styled("Failed to load NFTs", styles.error)),
                Line::from(err.to_string()),
                Line::from(Span::styled("Press r to retry", styles.placeholder)),
            ];
            render_message(frame, area, block, lines, styles.row);
        }
        LoadStatus::Ready => {
            let header = Row::new(columns.columns().iter().map(|c| header_cell(c.kind)))
                .style(styles.header);
            let body_height = area.height.saturating_sub(GRID_HEADER_ROWS + 1) as usize;
            let slots = grid_rows(state);
            let rows: Vec<Row> = slots
                .iter()
                .skip(state.scroll_offset())
                .take(body_height)
                .map(|slot| slot_row(slot, &columns, styles))
                .collect();
            let widths: Vec<Constraint> =
                columns.widths().into_iter().map(Constraint::Length).collect();

            let table = Table::new(rows, widths)
                .header(header)
                .column_spacing(COLUMN_SPACING)
                .block(block);
            frame.render_widget(table, area);
        }
    }

    columns
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    block: Block<'_>,
    lines: Vec<Line<'static>>,
    style: Style,
) {
    let paragraph = Paragraph::new(lines)
        .style(style)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// `" NFTs (12+) "` in flatten mode, `" NFTs page 2/3 "` when paginating.
fn grid_title(state: &AppState) -> String {
    let acc = &state.accumulator;
    let more = if acc.has_more() { "+" } else { "" };
    match (acc.mode(), acc.current_page()) {
        (AccumulationMode::Paginate, Some(index)) => {
            format!(" NFTs page {}/{}{} ", index + 1, acc.page_count(), more)
        }
        _ => format!(" NFTs ({}{}) ", acc.total_items(), more),
    }
}

fn header_cell(kind: ColumnKind) -> Cell<'static> {
    Cell::from(match kind {
        ColumnKind::Checkbox | ColumnKind::Send => "",
        ColumnKind::Collection => "Collection",
        ColumnKind::Token => "Token",
        ColumnKind::Links => "Links",
    })
}

fn glyph(image: ImageGlyph) -> &'static str {
    match image {
        ImageGlyph::Image => IMAGE_GLYPH,
        ImageGlyph::Placeholder => PLACEHOLDER_GLYPH,
    }
}

fn slot_row<'a>(slot: &'a RowSlot, columns: &ColumnLayout, styles: &TableStyles) -> Row<'a> {
    match slot {
        RowSlot::Placeholder => Row::new(columns.columns().iter().map(|c| match c.kind {
            ColumnKind::Collection => Cell::from(Span::styled("·", styles.placeholder)),
            _ => Cell::from(""),
        })),
        RowSlot::Data(cells) => {
            let style = if cells.highlighted {
                styles.highlighted
            } else if cells.checkbox == Some(true) {
                styles.selected
            } else {
                styles.row
            };
            Row::new(
                columns
                    .columns()
                    .iter()
                    .map(|c| data_cell(c.kind, cells, styles)),
            )
            .style(style)
        }
    }
}

fn data_cell<'a>(kind: ColumnKind, cells: &'a RowCells, styles: &TableStyles) -> Cell<'a> {
    match kind {
        ColumnKind::Checkbox => Cell::from(match cells.checkbox {
            Some(true) => "[x]",
            Some(false) => "[ ]",
            None => "",
        }),
        ColumnKind::Collection => Cell::from(Line::from(vec![
            Span::raw(glyph(cells.logo)),
            Span::raw(" "),
            Span::raw(cells.collection.as_str()),
        ])),
        ColumnKind::Token => {
            let label_style = if cells.token_link.is_some() {
                styles.link
            } else {
                Style::default()
            };
            Cell::from(Line::from(vec![
                Span::raw(glyph(cells.token_image)),
                Span::raw(" "),
                Span::styled(cells.token.as_str(), label_style),
            ]))
        }
        ColumnKind::Links => {
            let mut spans = Vec::with_capacity(cells.links.len() * 2);
            for (i, link) in cells.links.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(link.title.as_str(), styles.link));
            }
            Cell::from(Line::from(spans))
        }
        ColumnKind::Send if cells.send => Cell::from(Span::styled(SEND_LABEL, styles.send)),
        ColumnKind::Send => Cell::from(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AccountAddress, ContractAddress, FetchError, Item, OwnerAuthorization, Page, TokenId,
    };
    use crate::state::ViewOptions;
    use crate::test_harness::buffer_to_string;
    use ratatui::{backend::TestBackend, Terminal};

    const OWNER: &str = "0x1111111111111111111111111111111111111111";

    fn item(id: &str, name: Option<&str>) -> Item {
        let item = Item::new(
            ContractAddress::new("0xabc").unwrap(),
            TokenId::new(id).unwrap(),
            "Kitties",
            "CK",
        );
        match name {
            Some(name) => item.with_name(name),
            None => item,
        }
    }

    fn granted_state() -> AppState {
        let owner = AccountAddress::parse(OWNER).unwrap();
        AppState::new(
            ViewOptions::default(),
            Box::new(OwnerAuthorization::new(Some(owner.clone()), vec![owner])),
        )
    }

    fn load(state: &mut AppState, page: Result<Page, FetchError>) {
        let ticket = state.accumulator.begin_request().unwrap();
        state.apply_page(&ticket, page);
    }

    fn render(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                render_grid(frame, frame.area(), state, &TableStyles::default());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn loading_state_shows_indicator() {
        let mut state = granted_state();
        state.accumulator.begin_request();
        assert!(render(&state, 60, 8).contains("Loading NFTs"));
    }

    #[test]
    fn empty_first_page_shows_empty_message() {
        let mut state = granted_state();
        load(&mut state, Ok(Page::new(vec![])));
        let out = render(&state, 60, 8);
        assert!(out.contains("No NFTs available or none detected"));
        assert!(!out.contains("Collection"));
    }

    #[test]
    fn failure_with_nothing_loaded_shows_error() {
        let mut state = granted_state();
        load(
            &mut state,
            Err(FetchError::Http {
                status: 502,
                url: "https://gw.example".to_string(),
            }),
        );
        let out = render(&state, 60, 8);
        assert!(out.contains("Failed to load NFTs"));
        assert!(out.contains("Press r to retry"));
    }

    #[test]
    fn ready_grid_pads_to_ten_rows() {
        let mut state = granted_state();
        load(&mut state, Ok(Page::new(vec![item("1", Some("Tabby"))])));
        let out = render(&state, 100, 16);

        assert!(out.contains("Tabby"));
        assert!(out.contains(SEND_LABEL));
        assert_eq!(out.matches('·').count(), 9);
    }

    #[test]
    fn long_token_id_is_truncated() {
        let long_id = "1234567890123456789012345";
        let mut state = granted_state();
        load(&mut state, Ok(Page::new(vec![item(long_id, None)])));
        let out = render(&state, 120, 16);

        assert!(out.contains("CK #12345678901234567890"));
        assert!(!out.contains(long_id));
    }

    #[test]
    fn read_only_hides_send() {
        let mut state =
            AppState::new(ViewOptions::default(), Box::new(OwnerAuthorization::read_only()));
        load(&mut state, Ok(Page::new(vec![item("1", Some("Tabby"))])));
        assert!(!render(&state, 100, 16).contains(SEND_LABEL));
    }

    #[test]
    fn title_reports_more_pages() {
        let mut state = granted_state();
        load(
            &mut state,
            Ok(Page::new(vec![item("1", None)]).with_next(crate::model::Cursor::new("p2"))),
        );
        assert!(render(&state, 100, 16).contains("NFTs (1+)"));
    }

    #[test]
    fn narrow_ready_grid_layout_fits_inside_border() {
        let mut state = granted_state();
        load(&mut state, Ok(Page::new(vec![item("1", Some("Tabby"))])));
        let mut terminal = Terminal::new(TestBackend::new(24, 12)).unwrap();
        let mut columns = None;
        terminal
            .draw(|frame| {
                columns = Some(render_grid(frame, frame.area(), &state, &TableStyles::default()));
            })
            .unwrap();

        let columns = columns.unwrap();
        let right = columns.columns().last().map_or(0, |c| c.x + c.width);
        assert!(right <= 22);
        assert!(!buffer_to_string(terminal.backend().buffer()).contains(SEND_LABEL));
    }
}
