use engine::{BudgetStatus, money::format_amount};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, Summary},
    ui::{
        components::{
            card::{Card, StatCard},
            charts::{MoneyBar, render_money_bars},
            money::{budget_gauge, level_color, styled_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, summary: &Summary) {
    let theme = Theme::default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Totals
            Constraint::Length(7), // Budget
            Constraint::Min(8),    // Charts
        ])
        .split(area);

    render_totals(frame, rows[0], state, summary, &theme);
    render_budget(frame, rows[1], state, summary, &theme);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);
    render_breakdown(frame, charts[0], state, summary, &theme);
    render_income_vs_expense(frame, charts[1], state, summary, &theme);
}

fn render_totals(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);
    let display = &state.ctx.display;
    let totals = summary.totals;

    let count = state.transactions.items.len();
    StatCard::new("Balance", styled_amount(totals.balance, display, theme), theme)
        .subtitle(format!("{count} transactions"))
        .render(frame, cols[0]);
    StatCard::new(
        "Income",
        Span::styled(
            format_amount(totals.income, display),
            Style::default().fg(theme.positive),
        ),
        theme,
    )
    .render(frame, cols[1]);
    StatCard::new(
        "Expenses",
        Span::styled(
            format_amount(totals.expenses, display),
            Style::default().fg(theme.negative),
        ),
        theme,
    )
    .render(frame, cols[2]);
}

fn render_budget(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let card = Card::new("Monthly budget", theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);

    let usage = match summary.budget {
        BudgetStatus::Unset => {
            let hint = match &state.budget.error {
                Some(err) => Line::styled(err.clone(), Style::default().fg(theme.error)),
                None => Line::from(vec![
                    Span::styled("No budget set. Press ", Style::default().fg(theme.dim)),
                    Span::styled("b", Style::default().fg(theme.accent)),
                    Span::styled(" to set one.", Style::default().fg(theme.dim)),
                ]),
            };
            frame.render_widget(Paragraph::new(hint), inner);
            return;
        }
        BudgetStatus::Active(usage) => usage,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let display = &state.ctx.display;
    let figures = Line::from(vec![
        Span::styled("Budget ", Style::default().fg(theme.text_muted)),
        Span::raw(format_amount(usage.budget, display)),
        Span::styled("   Spent ", Style::default().fg(theme.text_muted)),
        Span::raw(format_amount(usage.spent, display)),
        Span::styled("   Remaining ", Style::default().fg(theme.text_muted)),
        styled_amount(usage.remaining, display, theme),
    ]);
    frame.render_widget(Paragraph::new(figures), rows[0]);
    frame.render_widget(
        budget_gauge(usage.percentage, usage.level, theme),
        rows[1],
    );

    if let Some(alert) = usage.level.alert() {
        let style = Style::default()
            .fg(level_color(usage.level, theme))
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Line::styled(alert, style)), rows[2]);
    }
}

fn render_breakdown(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let bars: Vec<MoneyBar> = summary
        .breakdown
        .iter()
        .map(|(label, amount)| MoneyBar {
            label,
            amount,
            color: theme.accent,
        })
        .collect();

    render_money_bars(
        frame,
        area,
        "Expenses by category",
        &bars,
        &state.ctx.display,
        Direction::Horizontal,
        theme,
    );
}

fn render_income_vs_expense(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    summary: &Summary,
    theme: &Theme,
) {
    let bars = if state.transactions.items.is_empty() {
        Vec::new()
    } else {
        vec![
            MoneyBar {
                label: "Income",
                amount: summary.totals.income,
                color: theme.positive,
            },
            MoneyBar {
                label: "Expenses",
                amount: summary.totals.expenses,
                color: theme.negative,
            },
        ]
    };

    render_money_bars(
        frame,
        area,
        "Income vs expenses",
        &bars,
        &state.ctx.display,
        Direction::Vertical,
        theme,
    );
}
