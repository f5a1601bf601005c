pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Mode, Section, Summary},
    rates::RatesStatus,
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    let theme = Theme::default();
    let summary = state.summary();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(1), // Tabs
            Constraint::Length(1), // Fallback-rate warning
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    render_tabs(frame, layout[1], state.section, &theme);
    render_rate_warning(frame, layout[2], &summary, &theme);

    match state.section {
        Section::Dashboard => screens::dashboard::render(frame, layout[3], state, &summary),
        Section::Transactions => screens::transactions::render(frame, layout[3], state),
    }

    render_bottom_bar(frame, layout[4], state, &theme);
    screens::form::render(frame, area, state);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = if state.connection_ok {
        ("OK", Style::default().fg(theme.positive))
    } else {
        ("ERR", Style::default().fg(theme.error))
    };
    let (rates, rates_style) = match state.rates_status() {
        RatesStatus::Loading => ("loading".to_string(), Style::default().fg(theme.dim)),
        RatesStatus::Loaded(count) => (format!("{count} loaded"), Style::default()),
        RatesStatus::Failed(_) => ("unavailable".to_string(), Style::default().fg(theme.warning)),
    };

    let line = Line::from(vec![
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Currency", Style::default().fg(theme.text_muted)),
        Span::styled(
            format!(": {}  ", state.ctx.display),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("Rates", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        Span::styled(rates, rates_style),
        Span::raw("  "),
        Span::styled("Refresh", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Section, theme: &Theme) {
    let mut spans = Vec::new();
    for (index, section) in Section::all().into_iter().enumerate() {
        let style = if section == active {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_muted)
        };
        spans.push(Span::styled(
            format!(" {} {} ", index + 1, section.label()),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Names the currencies whose figures rest on the 1:1 fallback rate.
fn render_rate_warning(frame: &mut Frame<'_>, area: Rect, summary: &Summary, theme: &Theme) {
    if summary.unpriced.is_empty() {
        return;
    }
    let codes: Vec<&str> = summary
        .unpriced.iter().map(|code| code.code()).collect();
    let text = format!(
        "No exchange rate for {}: converted at 1:1 (entries marked *)",
        codes.join(", ")
    );
    frame.render_widget(
        Paragraph::new(Line::styled(text, Style::default().fg(theme.warning))),
        area,
    );
}

fn hint(key: &'static str, label: &'static str, theme: &Theme) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(theme.accent)),
        Span::raw(label),
    ]
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let hints: Vec<[Span<'static>; 2]> = match (&state.mode, state.section) {
        (Mode::AddTransaction, _) => vec![
            hint("Tab", " next  ", theme),
            hint("↑↓", " choose  ", theme),
            hint("Enter", " save  ", theme),
            hint("Esc", " cancel", theme),
        ],
        (Mode::SetBudget, _) => vec![hint("Enter", " save  ", theme), hint("Esc", " cancel", theme)],
        (Mode::ConfirmDelete { .. }, _) => {
            vec![hint("y", " delete  ", theme), hint("n", " keep", theme)]
        }
        (Mode::Browse, section) => {
            let mut hints = vec![
                hint("Tab", " section  ", theme),
                hint("a", " add  ", theme),
                hint("b", " budget  ", theme),
                hint("c", " currency  ", theme),
                hint("t", " type  ", theme),
                hint("g", " category  ", theme),
                hint("r", " reload  ", theme),
            ];
            if section == Section::Transactions {
                hints.push(hint("d", " delete  ", theme));
            }
            hints.push(hint("q", " quit", theme));
            hints
        }
    };

    let parts: Vec<Span> = hints.into_iter().flatten().collect();
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
