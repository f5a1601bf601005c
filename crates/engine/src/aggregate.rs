//! Reductions over already-fetched transactions.
//!
//! Every function takes the [`ConversionContext`] of the current render pass and
//! converts each record into the display currency before summing. Nothing here touches
//! the network or mutates the records.

use std::collections::BTreeSet;

use crate::{Budget, ConversionContext, CurrencyCode, Transaction};

/// Warning threshold, in percent of the budget.
pub const WARNING_PERCENT: f64 = 80.0;
/// Exceeded threshold, in percent of the budget.
pub const EXCEEDED_PERCENT: f64 = 100.0;

/// Income, expenses and balance in the display currency.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// Sums converted amounts by type, in input order. `balance = income - expenses`.
#[must_use]
pub fn compute_totals(ctx: &ConversionContext, transactions: &[Transaction]) -> Totals {
    let (income, expenses) = transactions.iter().fold((0.0, 0.0), |(income, expenses), tx| {
        let amount = ctx.to_display(tx.amount, &tx.currency);
        if tx.is_income() {
            (income + amount, expenses)
        } else {
            (income, expenses + amount)
        }
    });

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}

/// Expense sums per category, in the order categories first appear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(String, f64)>,
}

impl CategoryBreakdown {
    fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    #[must_use]
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find_map(|(name, total)| (name == category).then_some(*total))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Converted expense amounts grouped by category. Income is ignored and categories with
/// no expense never appear.
#[must_use]
pub fn category_breakdown(
    ctx: &ConversionContext,
    transactions: &[Transaction],
) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        breakdown.add(&tx.category, ctx.to_display(tx.amount, &tx.currency));
    }
    breakdown
}

/// Budget utilization tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetLevel {
    Ok,
    Warning,
    Exceeded,
}

impl BudgetLevel {
    /// `Ok` below 80 %, `Warning` from 80 % up to 100 %, `Exceeded` from 100 %.
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCEEDED_PERCENT {
            Self::Exceeded
        } else if percentage >= WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Message raised after a change that pushes spending into a warning tier.
    #[must_use]
    pub fn alert(self) -> Option<&'static str> {
        match self {
            Self::Ok => None,
            Self::Warning => Some("Budget warning: you have used 80% of your monthly budget"),
            Self::Exceeded => Some("Budget alert: you have exceeded your monthly budget"),
        }
    }
}

/// Budget figures in the display currency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BudgetUsage {
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage: f64,
    pub level: BudgetLevel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BudgetStatus {
    /// No budget is set, or its amount converts to zero.
    Unset,
    Active(BudgetUsage),
}

impl BudgetStatus {
    #[must_use]
    pub fn usage(&self) -> Option<&BudgetUsage> {
        match self {
            Self::Unset => None,
            Self::Active(usage) => Some(usage),
        }
    }

    #[must_use]
    pub fn level(&self) -> Option<BudgetLevel> {
        self.usage().map(|usage| usage.level)
    }
}

/// Compares converted expenses against the converted budget.
///
/// Income records in `expenses` are skipped. A missing budget, or one whose converted
/// amount is zero or not finite, yields [`BudgetStatus::Unset`] instead of a division by
/// zero.
#[must_use]
pub fn budget_status(
    ctx: &ConversionContext,
    budget: Option<&Budget>,
    expenses: &[Transaction],
) -> BudgetStatus {
    let Some(budget) = budget else {
        return BudgetStatus::Unset;
    };

    let amount = ctx.to_display(budget.amount, &budget.currency);
    if !amount.is_finite() || amount <= 0.0 {
        return BudgetStatus::Unset;
    }

    let spent: f64 = expenses
        .iter()
        .filter(|tx| tx.is_expense())
        .map(|tx| ctx.to_display(tx.amount, &tx.currency))
        .sum();

    let percentage = spent * 100.0 / amount;
    if !percentage.is_finite() {
        return BudgetStatus::Unset;
    }
    BudgetStatus::Active(BudgetUsage {
        budget: amount,
        spent,
        remaining: amount - spent,
        percentage,
        level: BudgetLevel::from_percentage(percentage),
    })
}

/// Currencies among `transactions` that can only be converted with the fallback rate.
#[must_use]
pub fn unpriced_currencies(
    ctx: &ConversionContext,
    transactions: &[Transaction],
) -> BTreeSet<CurrencyCode> {
    let mut unpriced: BTreeSet<CurrencyCode> = transactions
        .iter()
        .filter(|tx| tx.currency != ctx.display && !ctx.rates.is_known(&tx.currency))
        .map(|tx| tx.currency.clone())
        .collect();
    if !transactions.is_empty()
        && !ctx.rates.is_known(&ctx.display)
        && transactions.iter().any(|tx| tx.currency != ctx.display)
    {
        unpriced.insert(ctx.display.clone());
    }
    unpriced
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{RateTable, TransactionKind};

    fn tx(kind: TransactionKind, amount: f64, currency: &str, category: &str) -> Transaction {
        Transaction {
            id: format!("{category}-{amount}"),
            kind,
            description: String::new(),
            amount,
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            currency: CurrencyCode::try_from(currency).unwrap(),
        }
    }

    fn usd_ctx() -> ConversionContext {
        ConversionContext::new(CurrencyCode::usd(), RateTable::new())
    }

    fn budget(amount: f64) -> Budget {
        Budget {
            amount,
            currency: CurrencyCode::usd(),
        }
    }

    #[test]
    fn totals_of_nothing_are_zero() {
        assert_eq!(compute_totals(&usd_ctx(), &[]), Totals::default());
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let txs = [
            tx(TransactionKind::Income, 1000.0, "USD", "Salary"),
            tx(TransactionKind::Expense, 250.0, "USD", "Rent"),
            tx(TransactionKind::Expense, 50.0, "USD", "Food"),
        ];
        let totals = compute_totals(&usd_ctx(), &txs);
        assert_eq!(totals.income, 1000.0);
        assert_eq!(totals.expenses, 300.0);
        assert_eq!(totals.balance, 700.0);
    }

    #[test]
    fn breakdown_keeps_first_seen_order() {
        let txs = [
            tx(TransactionKind::Expense, 5.0, "USD", "Transport"),
            tx(TransactionKind::Expense, 7.0, "USD", "Food"),
            tx(TransactionKind::Expense, 3.0, "USD", "Transport"),
        ];
        let breakdown = category_breakdown(&usd_ctx(), &txs);
        let entries: Vec<_> = breakdown.iter().collect();
        assert_eq!(entries, vec![("Transport", 8.0), ("Food", 7.0)]);
        assert_eq!(breakdown.get("Rent"), None);
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(BudgetLevel::from_percentage(0.0), BudgetLevel::Ok);
        assert_eq!(BudgetLevel::from_percentage(79.99), BudgetLevel::Ok);
        assert_eq!(BudgetLevel::from_percentage(80.0), BudgetLevel::Warning);
        assert_eq!(BudgetLevel::from_percentage(99.99), BudgetLevel::Warning);
        assert_eq!(BudgetLevel::from_percentage(100.0), BudgetLevel::Exceeded);
        assert_eq!(BudgetLevel::from_percentage(250.0), BudgetLevel::Exceeded);
    }

    #[test]
    fn ok_level_raises_no_alert() {
        assert!(BudgetLevel::Ok.alert().is_none());
        assert!(BudgetLevel::Warning.alert().is_some());
        assert!(BudgetLevel::Exceeded.alert().is_some());
    }

    #[test]
    fn budget_status_ignores_income() {
        let txs = [
            tx(TransactionKind::Income, 500.0, "USD", "Salary"),
            tx(TransactionKind::Expense, 40.0, "USD", "Food"),
        ];
        let status = budget_status(&usd_ctx(), Some(&budget(100.0)), &txs);
        let usage = status.usage().unwrap();
        assert_eq!(usage.spent, 40.0);
        assert_eq!(usage.remaining, 60.0);
        assert_eq!(usage.percentage, 40.0);
        assert_eq!(usage.level, BudgetLevel::Ok);
    }

    #[test]
    fn budget_is_converted_to_display_currency() {
        let (rates, _) = RateTable::from_entries([("EUR", 0.5)]);
        let ctx = ConversionContext::new(CurrencyCode::try_from("EUR").unwrap(), rates);
        let txs = [tx(TransactionKind::Expense, 40.0, "EUR", "Food")];

        // 100 USD = 50 EUR
        let status = budget_status(&ctx, Some(&budget(100.0)), &txs);
        let usage = status.usage().unwrap();
        assert_eq!(usage.budget, 50.0);
        assert_eq!(usage.percentage, 80.0);
        assert_eq!(usage.level, BudgetLevel::Warning);
    }

    #[test]
    fn subnormal_budget_is_unset() {
        let txs = [tx(TransactionKind::Expense, 10.0, "USD", "Food")];
        let status = budget_status(&usd_ctx(), Some(&budget(1e-320)), &txs);
        assert_eq!(status, BudgetStatus::Unset);
    }

    #[test]
    fn non_finite_budget_is_unset() {
        let status = budget_status(&usd_ctx(), Some(&budget(f64::NAN)), &[]);
        assert_eq!(status, BudgetStatus::Unset);
        assert_eq!(status.level(), None);
    }

    #[test]
    fn unpriced_lists_currencies_missing_from_table() {
        let (rates, _) = RateTable::from_entries([("EUR", 0.9)]);
        let ctx = ConversionContext::new(CurrencyCode::usd(), rates);
        let txs = [
            tx(TransactionKind::Expense, 1.0, "EUR", "Food"),
            tx(TransactionKind::Expense, 1.0, "CHF", "Food"),
            tx(TransactionKind::Income, 1.0, "USD", "Salary"),
        ];
        let unpriced: Vec<_> = unpriced_currencies(&ctx, &txs)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(unpriced, vec!["CHF".to_string()]);
    }

    #[test]
    fn unpriced_includes_unknown_display_currency() {
        let ctx = ConversionContext::new(CurrencyCode::try_from("CHF").unwrap(), RateTable::new());
        let txs = [tx(TransactionKind::Expense, 1.0, "USD", "Food")];
        let unpriced: Vec<_> = unpriced_currencies(&ctx, &txs)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(unpriced, vec!["CHF".to_string()]);
    }
}
