//! Modal dialogs drawn over the current section.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, FormField, Mode},
    ui::theme::Theme,
};

/// Centers a `width` x `height` box in `area`.
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn modal(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>, theme: &Theme) {
    let height = lines.len() as u16 + 2;
    let rect = centered_box(48.min(area.width), height.min(area.height), area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn input_line(label: &str, value: &str, focused: bool, choice: bool, theme: &Theme) -> Line<'static> {
    let (marker, style) = if focused {
        ("›", Style::default().fg(theme.accent))
    } else {
        (" ", Style::default().fg(theme.text_muted))
    };
    let value = match (focused, choice) {
        (true, true) => format!("‹ {value} ›"),
        (true, false) => format!("{value}│"),
        (false, _) => value.to_string(),
    };

    Line::from(vec![
        Span::styled(format!("{marker} {label:<12}"), style),
        Span::styled(value, Style::default().fg(theme.text)),
    ])
}

fn error_line(error: Option<&str>, theme: &Theme) -> Line<'static> {
    Line::styled(
        error.unwrap_or_default().to_string(),
        Style::default().fg(theme.error),
    )
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    match &state.mode {
        Mode::Browse => {}
        Mode::AddTransaction => render_transaction_form(frame, area, state, &theme),
        Mode::SetBudget => render_budget_form(frame, area, state, &theme),
        Mode::ConfirmDelete { label, .. } => {
            let lines = vec![
                Line::from(format!("Delete \"{label}\"?")),
                Line::from(""),
                Line::from(vec![
                    Span::styled("y", Style::default().fg(theme.accent)),
                    Span::raw(" delete   "),
                    Span::styled("n", Style::default().fg(theme.accent)),
                    Span::raw(" keep"),
                ]),
            ];
            modal(frame, area, "confirm", lines, &theme);
        }
    }
}

fn render_transaction_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.form;
    let mut lines: Vec<Line> = FormField::all()
        .into_iter()
        .map(|field| {
            input_line(
                field.label(),
                form.value(field, &state.categories),
                form.focus == field,
                field.is_choice(),
                theme,
            )
        })
        .collect();

    lines.push(Line::from(Span::styled(
        format!("  stored in {}", state.ctx.display),
        Style::default().fg(theme.dim),
    )));
    lines.push(error_line(form.error.as_deref(), theme));
    modal(frame, area, "add transaction", lines, theme);
}

fn render_budget_form(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let form = &state.budget_form;
    let lines = vec![
        input_line(
            &format!("Amount {}", state.ctx.display),
            &form.amount,
            true,
            false,
            theme,
        ),
        Line::styled(
            "  Enter save   Esc cancel",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        ),
        error_line(form.error.as_deref(), theme),
    ];
    modal(frame, area, "monthly budget", lines, theme);
}
