use engine::{CurrencyCode, money::format_amount};
use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
};

use crate::ui::{components::card::Card, theme::Theme};

/// One bar of a money chart: label, amount in the display currency and color.
pub struct MoneyBar<'a> {
    pub label: &'a str,
    pub amount: f64,
    pub color: Color,
}

/// Bar height in whole currency units. Negative or non-finite amounts draw nothing.
#[must_use]
pub fn bar_value(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}

/// Renders labeled bars inside a card, each annotated with its formatted amount.
pub fn render_money_bars(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    bars: &[MoneyBar<'_>],
    currency: &CurrencyCode,
    direction: Direction,
    theme: &Theme,
) {
    let card = Card::new(title, theme);
    if bars.is_empty() {
        let empty = Paragraph::new(Line::styled("No data yet", Style::default().fg(theme.dim)));
        card.render_with(frame, area, empty);
        return;
    }

    let bars: Vec<Bar> = bars
        .iter()
        .map(|bar| {
            Bar::default()
                .value(bar_value(bar.amount))
                .label(Line::from(bar.label.to_string()))
                .text_value(format_amount(bar.amount, currency))
                .style(Style::default().fg(bar.color))
        })
        .collect();

    let chart = BarChart::default()
        .direction(direction)
        .data(BarGroup::default().bars(&bars))
        .bar_width(if direction == Direction::Horizontal { 1 } else { 9 })
        .bar_gap(1)
        .value_style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        .label_style(Style::default().fg(theme.text_muted));

    card.render_with(frame, area, chart);
}
