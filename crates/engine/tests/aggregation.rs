use chrono::NaiveDate;

use engine::{
    Budget, BudgetLevel, BudgetStatus, ConversionContext, CurrencyCode, RateTable, Transaction,
    TransactionKind, budget_status, category_breakdown, compute_totals, convert,
};

const TOLERANCE: f64 = 1e-9;

fn code(value: &str) -> CurrencyCode {
    CurrencyCode::try_from(value).unwrap()
}

fn tx(kind: TransactionKind, amount: f64, currency: &str, category: &str) -> Transaction {
    Transaction {
        id: format!("{}-{category}-{amount}", kind.as_str()),
        kind,
        description: format!("{category} entry"),
        amount,
        category: category.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        currency: code(currency),
    }
}

fn income(amount: f64, currency: &str) -> Transaction {
    tx(TransactionKind::Income, amount, currency, "Salary")
}

fn expense(amount: f64, currency: &str, category: &str) -> Transaction {
    tx(TransactionKind::Expense, amount, currency, category)
}

fn usd_budget(amount: f64) -> Budget {
    Budget {
        amount,
        currency: CurrencyCode::usd(),
    }
}

fn usd_ctx() -> ConversionContext {
    ConversionContext::new(CurrencyCode::usd(), RateTable::new())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn identity_holds_for_any_table() {
    let (rates, _) = RateTable::from_entries([("EUR", 0.9), ("GBP", 0.8)]);
    for currency in ["USD", "EUR", "GBP", "CHF"] {
        let c = code(currency);
        for amount in [0.01, 7.0 / 3.0, 1e12] {
            assert_eq!(convert(amount, &c, &c, &rates), amount);
            assert_eq!(convert(amount, &c, &c, &RateTable::new()), amount);
        }
    }
}

#[test]
fn empty_table_falls_back_to_parity() {
    assert_eq!(
        convert(100.0, &code("EUR"), &CurrencyCode::usd(), &RateTable::new()),
        100.0
    );
}

#[test]
fn round_trip_between_known_currencies() {
    let (rates, _) = RateTable::from_entries([("EUR", 0.92), ("GBP", 0.79), ("JPY", 151.3)]);
    let pairs = [("EUR", "GBP"), ("GBP", "JPY"), ("JPY", "EUR"), ("USD", "EUR")];
    for (a, b) in pairs {
        let (a, b) = (code(a), code(b));
        for amount in [0.5, 42.0, 98_765.43] {
            let back = convert(convert(amount, &a, &b, &rates), &b, &a, &rates);
            assert!((back - amount).abs() <= amount * 1e-12);
        }
    }
}

#[test]
fn totals_do_not_depend_on_order() {
    let (rates, _) = RateTable::from_entries([("EUR", 0.9), ("GBP", 0.8)]);
    let ctx = ConversionContext::new(code("EUR"), rates);
    let txs = vec![
        income(1200.0, "USD"),
        expense(30.5, "EUR", "Food"),
        expense(19.99, "GBP", "Transport"),
        income(75.25, "GBP"),
        expense(300.0, "USD", "Bills"),
    ];
    let reference = compute_totals(&ctx, &txs);

    let mut reversed = txs.clone();
    reversed.reverse();
    let mut permutations = vec![reversed];
    for shift in 1..txs.len() {
        let mut rotated = txs.clone();
        rotated.rotate_left(shift);
        permutations.push(rotated);
    }

    for permutation in permutations {
        let totals = compute_totals(&ctx, &permutation);
        assert_close(totals.income, reference.income);
        assert_close(totals.expenses, reference.expenses);
        assert_close(totals.balance, reference.balance);
    }
}

#[test]
fn budget_tiers_at_one_hundred() {
    let cases = [
        (79.99, BudgetLevel::Ok),
        (80.0, BudgetLevel::Warning),
        (100.0, BudgetLevel::Exceeded),
        (150.0, BudgetLevel::Exceeded),
    ];
    for (spent, level) in cases {
        let status = budget_status(
            &usd_ctx(),
            Some(&usd_budget(100.0)),
            &[expense(spent, "USD", "Food")],
        );
        assert_eq!(status.level(), Some(level), "spent {spent}");
    }

    let status = budget_status(
        &usd_ctx(),
        Some(&usd_budget(100.0)),
        &[expense(150.0, "USD", "Food")],
    );
    let usage = status.usage().unwrap();
    assert_eq!(usage.remaining, -50.0);
    assert_eq!(usage.percentage, 150.0);
}

#[test]
fn missing_budget_is_unset() {
    let status = budget_status(&usd_ctx(), None, &[expense(10.0, "USD", "Food")]);
    assert_eq!(status, BudgetStatus::Unset);
    assert!(status.usage().is_none());
}

#[test]
fn zero_budget_is_unset_not_infinite() {
    let status = budget_status(
        &usd_ctx(),
        Some(&usd_budget(0.0)),
        &[expense(10.0, "USD", "Food")],
    );
    assert_eq!(status, BudgetStatus::Unset);
}

#[test]
fn breakdown_excludes_income() {
    let txs = [
        income(2000.0, "USD"),
        expense(12.0, "USD", "Food"),
        income(150.0, "USD"),
        expense(40.0, "USD", "Transport"),
        expense(8.0, "USD", "Food"),
    ];
    let breakdown = category_breakdown(&usd_ctx(), &txs);
    let totals = compute_totals(&usd_ctx(), &txs);

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown.get("Food"), Some(20.0));
    assert_eq!(breakdown.get("Transport"), Some(40.0));
    assert_eq!(breakdown.get("Salary"), None);
    assert_close(breakdown.iter().map(|(_, amount)| amount).sum(), totals.expenses);
}

#[test]
fn mixed_currency_dashboard() {
    let (rates, _) = RateTable::from_entries([("EUR", 0.9)]);
    let ctx = ConversionContext::new(CurrencyCode::usd(), rates);
    let txs = [
        income(100.0, "USD"),
        expense(30.0, "USD", "Food"),
        expense(20.0, "EUR", "Food"),
    ];

    assert!((ctx.to_display(20.0, &code("EUR")) - 22.22).abs() < 0.01);

    let totals = compute_totals(&ctx, &txs);
    assert_close(totals.income, 100.0);
    assert_close(totals.expenses, 30.0 + 20.0 / 0.9);
    assert_close(totals.balance, 70.0 - 20.0 / 0.9);
    assert!((totals.expenses - 52.22).abs() < 0.01);
    assert!((totals.balance - 47.78).abs() < 0.01);

    let breakdown = category_breakdown(&ctx, &txs);
    assert_eq!(breakdown.len(), 1);
    assert_close(breakdown.get("Food").unwrap(), 30.0 + 20.0 / 0.9);
}

#[test]
fn stored_records_keep_their_currency() {
    let (rates, _) = RateTable::from_entries([("EUR", 0.9)]);
    let ctx = ConversionContext::new(code("EUR"), rates);
    let txs = vec![expense(10.0, "USD", "Food")];
    let before = txs.clone();

    let _ = compute_totals(&ctx, &txs);
    let _ = category_breakdown(&ctx, &txs);
    let _ = budget_status(&ctx, Some(&usd_budget(50.0)), &txs);

    assert_eq!(txs, before);
}
