use engine::{BudgetLevel, Converted, CurrencyCode, money::format_amount};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::Gauge,
};

use crate::ui::theme::Theme;

/// Suffix marking an amount converted with the 1:1 fallback rate.
pub const APPROXIMATE_MARK: &str = "*";

/// Formats a converted amount, marking fallback conversions.
#[must_use]
pub fn format_converted(converted: Converted, currency: &CurrencyCode) -> String {
    let formatted = format_amount(converted.amount, currency);
    if converted.approximate {
        format!("{formatted}{APPROXIMATE_MARK}")
    } else {
        formatted
    }
}

/// Amount colored by sign: positive green, negative red, zero neutral.
#[must_use]
pub fn styled_amount(amount: f64, currency: &CurrencyCode, theme: &Theme) -> Span<'static> {
    let color = if amount > 0.0 {
        theme.positive
    } else if amount < 0.0 {
        theme.negative
    } else {
        theme.text
    };
    Span::styled(format_amount(amount, currency), Style::default().fg(color))
}

/// Signed list entry: `+` for income, `-` for expenses.
#[must_use]
pub fn styled_entry(
    converted: Converted,
    income: bool,
    currency: &CurrencyCode,
    theme: &Theme,
) -> Span<'static> {
    let (color, sign) = if income {
        (theme.positive, "+")
    } else {
        (theme.negative, "-")
    };
    Span::styled(
        format!("{sign}{}", format_converted(converted, currency)),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

pub fn level_color(level: BudgetLevel, theme: &Theme) -> ratatui::style::Color {
    match level {
        BudgetLevel::Ok => theme.positive,
        BudgetLevel::Warning => theme.warning,
        BudgetLevel::Exceeded => theme.negative,
    }
}

/// Gauge filled with the used share of the budget, capped at 100 %.
#[must_use]
pub fn budget_gauge(percentage: f64, level: BudgetLevel, theme: &Theme) -> Gauge<'static> {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    Gauge::default()
        .gauge_style(Style::default().fg(level_color(level, theme)))
        .ratio(if ratio.is_finite() { ratio } else { 0.0 })
        .label(format!("{percentage:.1}% used"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_amounts_are_marked() {
        let usd = CurrencyCode::usd();
        let exact = Converted {
            amount: 12.0,
            approximate: false,
        };
        let approx = Converted {
            amount: 12.0,
            approximate: true,
        };
        assert_eq!(format_converted(exact, &usd), "$12.00");
        assert_eq!(format_converted(approx, &usd), "$12.00*");
    }

    #[test]
    fn entries_are_signed_by_kind() {
        let theme = Theme::default();
        let eur = CurrencyCode::try_from("EUR").unwrap();
        let converted = Converted {
            amount: 5.0,
            approximate: false,
        };
        assert_eq!(styled_entry(converted, true, &eur, &theme).content, "+€5.00");
        assert_eq!(styled_entry(converted, false, &eur, &theme).content, "-€5.00");
    }
}
