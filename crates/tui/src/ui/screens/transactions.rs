use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money::styled_entry},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let kind = state.filters.kind.map_or("all", |kind| kind.as_str());
    let category = state.filters.category.as_deref().unwrap_or("all");

    let mut line = vec![
        Span::styled("Type", Style::default().fg(theme.dim)),
        Span::raw(format!(": {kind}   ")),
        Span::styled("Category", Style::default().fg(theme.dim)),
        Span::raw(format!(": {category}")),
    ];
    if state.transactions.loading {
        line.push(Span::styled("   loading…", Style::default().fg(theme.dim)));
    }
    if let Some(err) = &state.transactions.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Transactions", theme).focused(true);
    let items = &state.transactions.items;

    if items.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No transactions. Press a to add one.",
            Style::default().fg(theme.dim),
        ));
        card.render_with(frame, area, empty);
        return;
    }

    let display = &state.ctx.display;
    let rows: Vec<ListItem> = items
        .iter()
        .map(|tx| {
            let converted = state.ctx.project(tx.amount, &tx.currency);
            let mut spans = vec![
                Span::styled(
                    tx.date.format("%Y-%m-%d  ").to_string(),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw(format!("{} - {}  ", tx.category, tx.description)),
                styled_entry(converted, tx.is_income(), display, theme),
            ];
            if tx.currency != *display {
                spans.push(Span::styled(
                    format!("  ({} {})", tx.amount, tx.currency),
                    Style::default().fg(theme.dim),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(rows)
        .block(card.block())
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.transactions.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}
