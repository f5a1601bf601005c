mod form;
mod sequence;

use std::time::{Duration, Instant};

use api_types::{
    budget::Budget as BudgetWire,
    transaction::{TransactionKind as KindWire, TransactionQuery, TransactionView},
};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};
use engine::{
    Budget, BudgetStatus, CategoryBreakdown, ConversionContext, CurrencyCode, Totals,
    Transaction, TransactionKind, budget_status, category_breakdown, compute_totals,
    unpriced_currencies,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{
    client::{Client, ClientError, budget_from_wire, transactions_from_views},
    config::AppConfig,
    error::{AppError, Result},
    rates::{RateCache, RatesStatus},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use form::{BudgetForm, FormField, TransactionForm};
pub use sequence::RequestSequence;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Transactions,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
        }
    }

    pub fn all() -> [Self; 2] {
        [Self::Dashboard, Self::Transactions]
    }

    fn toggle(self) -> Self {
        match self {
            Self::Dashboard => Self::Transactions,
            Self::Transactions => Self::Dashboard,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    AddTransaction,
    SetBudget,
    ConfirmDelete { id: String, label: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// Active list filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
}

impl Filters {
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery {
            kind: self.kind.map(|kind| match kind {
                TransactionKind::Income => KindWire::Income,
                TransactionKind::Expense => KindWire::Expense,
            }),
            category: self.category.clone(),
        }
    }

    fn cycle_kind(&mut self) {
        self.kind = match self.kind {
            None => Some(TransactionKind::Income),
            Some(TransactionKind::Income) => Some(TransactionKind::Expense),
            Some(TransactionKind::Expense) => None,
        };
    }

    fn cycle_category(&mut self, categories: &[String]) {
        let next = match &self.category {
            None => 0,
            Some(current) => match categories.iter().position(|c| c == current) {
                Some(index) => index + 1,
                None => categories.len(),
            },
        };
        self.category = categories.get(next).cloned();
    }
}

#[derive(Debug, Default)]
pub struct TransactionsState {
    pub items: Vec<Transaction>,
    pub selected: usize,
    pub loading: bool,
    pub error: Option<String>,
}

impl TransactionsState {
    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&Transaction> {
        self.items.get(self.selected)
    }
}

/// The budget and every expense it is compared against, regardless of list filters.
#[derive(Debug, Default)]
pub struct BudgetState {
    pub budget: Option<Budget>,
    pub expenses: Vec<Transaction>,
    pub error: Option<String>,
}

/// Figures of one render pass, all in the display currency.
#[derive(Debug)]
pub struct Summary {
    pub totals: Totals,
    pub breakdown: CategoryBreakdown,
    pub budget: BudgetStatus,
    /// Currencies converted with the 1:1 fallback.
    pub unpriced: Vec<CurrencyCode>,
}

#[derive(Debug)]
pub struct AppState {
    pub section: Section,
    pub mode: Mode,
    pub ctx: ConversionContext,
    pub rates: RateCache,
    pub currencies: Vec<CurrencyCode>,
    pub categories: Vec<String>,
    pub filters: Filters,
    pub transactions: TransactionsState,
    pub budget: BudgetState,
    pub form: TransactionForm,
    pub budget_form: BudgetForm,
    pub toast: Option<ToastState>,
    pub base_url: String,
    pub last_refresh: Option<DateTime<Local>>,
    pub connection_ok: bool,
}

impl AppState {
    pub fn summary(&self) -> Summary {
        let items = &self.transactions.items;
        let mut unpriced = unpriced_currencies(&self.ctx, items);
        unpriced.extend(unpriced_currencies(&self.ctx, &self.budget.expenses));
        if let Some(budget) = &self.budget.budget
            && self.ctx.project(budget.amount, &budget.currency).approximate
        {
            unpriced.insert(budget.currency.clone());
        }

        Summary {
            totals: compute_totals(&self.ctx, items),
            breakdown: category_breakdown(&self.ctx, items),
            budget: budget_status(
                &self.ctx,
                self.budget.budget.as_ref(),
                &self.budget.expenses,
            ),
            unpriced: unpriced.into_iter().collect(),
        }
    }

    pub fn rates_status(&self) -> &RatesStatus {
        self.rates.status()
    }

    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
            self.toast = None;
        }
    }
}

/// Results of spawned requests, applied by the event loop in arrival order.
#[derive(Debug)]
pub enum Message {
    Rates(std::result::Result<api_types::rates::RatesResponse, ClientError>),
    Transactions {
        seq: u64,
        result: std::result::Result<Vec<TransactionView>, ClientError>,
    },
    Budget {
        seq: u64,
        result: std::result::Result<(Option<BudgetWire>, Vec<TransactionView>), ClientError>,
    },
    TransactionCreated(std::result::Result<(), ClientError>),
    TransactionDeleted(std::result::Result<(), ClientError>),
    BudgetSaved(std::result::Result<(), ClientError>),
}

#[derive(Debug, Default)]
struct Sequences {
    transactions: RequestSequence,
    budget: RequestSequence,
}

pub struct App {
    client: Client,
    pub state: AppState,
    sequences: Sequences,
    /// Budget request issued after a successful add or budget change. The alert is
    /// checked once a response at least that new is applied.
    alert_after: Option<u64>,
    tx: UnboundedSender<Message>,
    rx: UnboundedReceiver<Message>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, &config.rates_url)?;
        let (display, currencies) = config.currency_codes()?;
        let (tx, rx) = unbounded_channel();

        let state = AppState {
            section: Section::Dashboard,
            mode: Mode::Browse,
            ctx: ConversionContext::new(display, Default::default()),
            rates: RateCache::default(),
            currencies,
            categories: config.categories.clone(),
            filters: Filters::default(),
            transactions: TransactionsState::default(),
            budget: BudgetState::default(),
            form: TransactionForm::new(Local::now().date_naive()),
            budget_form: BudgetForm::default(),
            toast: None,
            base_url: config.base_url,
            last_refresh: None,
            connection_ok: true,
        };

        Ok(Self {
            client,
            state,
            sequences: Sequences::default(),
            alert_after: None,
            tx,
            rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.refresh_rates();
        self.load_transactions();
        self.load_budget();

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(50);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }

            while let Ok(message) = self.rx.try_recv() {
                self.apply(message);
            }
            self.state.expire_toast(Instant::now());
        }

        Ok(())
    }

    fn spawn<F>(&self, request: F)
    where
        F: Future<Output = Message> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // The receiver only goes away on shutdown.
            let _ = tx.send(request.await);
        });
    }

    fn refresh_rates(&self) {
        let client = self.client.clone();
        self.spawn(async move { Message::Rates(client.rates_fetch().await) });
    }

    fn load_transactions(&mut self) {
        let seq = self.sequences.transactions.issue();
        let query = self.state.filters.query();
        let client = self.client.clone();
        self.state.transactions.loading = true;
        tracing::debug!(seq, ?query, "loading transactions");

        self.spawn(async move {
            let result = client.transactions_list(&query).await;
            Message::Transactions { seq, result }
        });
    }

    fn load_budget(&mut self) -> u64 {
        let seq = self.sequences.budget.issue();
        let client = self.client.clone();

        self.spawn(async move {
            let result = async {
                let Some(budget) = client.budget_get().await? else {
                    return Ok::<_, ClientError>((None, Vec::new()));
                };
                let expenses = TransactionQuery {
                    kind: Some(KindWire::Expense),
                    category: None,
                };
                let expenses = client.transactions_list(&expenses).await?;
                Ok::<_, ClientError>((Some(budget), expenses))
            }
            .await;
            Message::Budget { seq, result }
        });
        seq
    }

    fn reload(&mut self) -> u64 {
        self.load_transactions();
        self.load_budget()
    }

    fn alert_due(&mut self, seq: u64) -> bool {
        if self.alert_after.is_some_and(|after| seq >= after) {
            self.alert_after = None;
            return true;
        }
        false
    }

    fn report_failure(&mut self, action: &str, err: &ClientError) {
        tracing::warn!("{action} failed: {err}");
        if matches!(err, ClientError::Transport(_)) {
            self.state.connection_ok = false;
        }
        self.state.notify(ToastLevel::Error, format!("{action} failed: {err}"));
    }

    pub fn apply(&mut self, message: Message) {
        match message {
            Message::Rates(result) => {
                let failed = result.is_err();
                self.state.rates.apply_refresh(result);
                self.state.ctx.rates = self.state.rates.table().clone();
                if failed {
                    self.state.notify(
                        ToastLevel::Warning,
                        "Failed to load exchange rates, amounts shown at 1:1",
                    );
                }
            }
            Message::Transactions { seq, result } => {
                if !self.sequences.transactions.accept(seq) {
                    tracing::debug!(seq, "discarding stale transaction list");
                    return;
                }
                self.state.transactions.loading = self.sequences.transactions.pending();
                match result {
                    Ok(views) => {
                        let items = transactions_from_views(views);
                        let state = &mut self.state.transactions;
                        state.selected = state.selected.min(items.len().saturating_sub(1));
                        state.items = items;
                        state.error = None;
                        self.state.connection_ok = true;
                        self.state.last_refresh = Some(Local::now());
                    }
                    Err(err) => {
                        self.state.transactions.error = Some(err.to_string());
                        self.report_failure("Loading transactions", &err);
                    }
                }
            }
            Message::Budget { seq, result } => {
                if !self.sequences.budget.accept(seq) {
                    tracing::debug!(seq, "discarding stale budget");
                    return;
                }
                match result {
                    Ok((budget, expenses)) => {
                        self.state.budget.budget = budget_from_wire(budget);
                        self.state.budget.expenses = transactions_from_views(expenses);
                        self.state.budget.error = None;
                        if self.alert_due(seq) {
                            self.check_budget_alert();
                        }
                    }
                    Err(err) => {
                        self.alert_due(seq);
                        self.state.budget.error = Some(err.to_string());
                        self.report_failure("Loading budget", &err);
                    }
                }
            }
            Message::TransactionCreated(result) => match result {
                Ok(()) => {
                    self.state.mode = Mode::Browse;
                    self.state.form = TransactionForm::new(Local::now().date_naive());
                    self.state.notify(ToastLevel::Success, "Transaction added");
                    self.alert_after = Some(self.reload());
                }
                Err(err) => {
                    self.state.form.error = Some(err.to_string());
                    self.report_failure("Adding transaction", &err);
                }
            },
            Message::TransactionDeleted(result) => match result {
                Ok(()) => {
                    self.state.notify(ToastLevel::Success, "Transaction deleted");
                    self.reload();
                }
                Err(err) => self.report_failure("Deleting transaction", &err),
            },
            Message::BudgetSaved(result) => match result {
                Ok(()) => {
                    self.state.mode = Mode::Browse;
                    self.state.budget_form = BudgetForm::default();
                    self.state.notify(ToastLevel::Success, "Budget saved");
                    self.alert_after = Some(self.load_budget());
                }
                Err(err) => {
                    self.state.budget_form.error = Some(err.to_string());
                    self.report_failure("Saving budget", &err);
                }
            },
        }
    }

    fn check_budget_alert(&mut self) {
        let status = budget_status(
            &self.state.ctx,
            self.state.budget.budget.as_ref(),
            &self.state.budget.expenses,
        );
        if let Some(message) = status.level().and_then(|level| level.alert()) {
            tracing::info!(level = ?status.level(), "budget alert raised");
            self.state.notify(ToastLevel::Warning, message);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.mode.clone() {
            Mode::Browse => self.handle_browse(action),
            Mode::AddTransaction => self.handle_transaction_form(action),
            Mode::SetBudget => self.handle_budget_form(action),
            Mode::ConfirmDelete { id, .. } => self.handle_confirm_delete(action, id),
        }
    }

    fn handle_browse(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::PrevField => {
                self.state.section = self.state.section.toggle();
            }
            AppAction::Up => self.state.transactions.select_prev(),
            AppAction::Down => self.state.transactions.select_next(),
            AppAction::Input(ch) => self.handle_browse_char(ch),
            _ => {}
        }
    }

    fn handle_browse_char(&mut self, ch: char) {
        match ch {
            'q' | 'Q' => self.should_quit = true,
            'a' | 'A' => {
                self.state.form.error = None;
                self.state.mode = Mode::AddTransaction;
            }
            'b' | 'B' => {
                self.state.budget_form = BudgetForm::default();
                self.state.mode = Mode::SetBudget;
            }
            'c' | 'C' => self.cycle_currency(),
            't' | 'T' => {
                self.state.filters.cycle_kind();
                self.load_transactions();
            }
            'g' | 'G' => {
                self.state.filters.cycle_category(&self.state.categories);
                self.load_transactions();
            }
            'r' | 'R' => {
                if matches!(self.state.rates_status(), RatesStatus::Failed(_)) {
                    self.refresh_rates();
                }
                self.reload();
            }
            'j' | 'J' => self.state.transactions.select_next(),
            'k' | 'K' => self.state.transactions.select_prev(),
            'd' | 'D' | 'x' | 'X' => {
                if self.state.section != Section::Transactions {
                    return;
                }
                if let Some(tx) = self.state.transactions.selected_item() {
                    let label = format!("{} - {}", tx.category, tx.description);
                    self.state.mode = Mode::ConfirmDelete {
                        id: tx.id.clone(),
                        label,
                    };
                }
            }
            '1' => self.state.section = Section::Dashboard,
            '2' => self.state.section = Section::Transactions,
            _ => {}
        }
    }

    fn cycle_currency(&mut self) {
        let currencies = &self.state.currencies;
        if currencies.is_empty() {
            return;
        }
        let next = currencies
            .iter()
            .position(|code| *code == self.state.ctx.display)
            .map_or(0, |index| (index + 1) % currencies.len());
        self.state.ctx.display = currencies[next].clone();
        tracing::debug!(display = %self.state.ctx.display, "display currency changed");
        self.reload();
    }

    fn handle_transaction_form(&mut self, action: AppAction) {
        let categories = self.state.categories.len();
        let form = &mut self.state.form;
        match action {
            AppAction::Cancel => self.state.mode = Mode::Browse,
            AppAction::NextField => form.next_field(),
            AppAction::PrevField => form.prev_field(),
            AppAction::Up => form.cycle(false, categories),
            AppAction::Down => form.cycle(true, categories),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(' ') if form.focus.is_choice() => form.cycle(true, categories),
            AppAction::Input(ch) => form.input(ch),
            AppAction::Submit => self.submit_transaction(),
            AppAction::Quit | AppAction::None => {}
        }
    }

    fn submit_transaction(&mut self) {
        let built = self
            .state
            .form
            .build(&self.state.categories, &self.state.ctx.display);
        match built {
            Ok(payload) => {
                self.state.form.error = None;
                let client = self.client.clone();
                self.spawn(async move {
                    Message::TransactionCreated(client.transaction_create(&payload).await)
                });
            }
            Err(message) => {
                self.state.form.error = Some(message.clone());
                self.state.notify(ToastLevel::Error, message);
            }
        }
    }

    fn handle_budget_form(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.mode = Mode::Browse,
            AppAction::Backspace => {
                self.state.budget_form.amount.pop();
            }
            AppAction::Input(ch) => self.state.budget_form.amount.push(ch),
            AppAction::Submit => match self.state.budget_form.build(&self.state.ctx.display) {
                Ok(payload) => {
                    self.state.budget_form.error = None;
                    let client = self.client.clone();
                    self.spawn(
                        async move { Message::BudgetSaved(client.budget_set(&payload).await) },
                    );
                }
                Err(message) => {
                    self.state.budget_form.error = Some(message.clone());
                    self.state.notify(ToastLevel::Error, message);
                }
            },
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, action: AppAction, id: String) {
        match action {
            AppAction::Submit | AppAction::Input('y' | 'Y') => {
                self.state.mode = Mode::Browse;
                let client = self.client.clone();
                self.spawn(async move {
                    Message::TransactionDeleted(client.transaction_delete(&id).await)
                });
            }
            AppAction::Cancel | AppAction::Input('n' | 'N') => self.state.mode = Mode::Browse,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use api_types::rates::RatesResponse;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn app() -> App {
        let config = AppConfig {
            base_url: "http://127.0.0.1:9/api/".to_string(),
            rates_url: "http://127.0.0.1:9/rates".to_string(),
            ..AppConfig::default()
        };
        App::new(config).unwrap()
    }

    fn view(id: &str, kind: KindWire, amount: f64, currency: &str) -> TransactionView {
        TransactionView {
            id: id.to_string(),
            kind,
            description: id.to_string(),
            amount,
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            currency: Some(currency.to_string()),
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ids(items: &[Transaction]) -> Vec<&str> {
        items.iter().map(|tx| tx.id.as_str()).collect()
    }

    #[test]
    fn stale_transaction_list_is_discarded() {
        let mut app = app();
        let old = app.sequences.transactions.issue();
        let new = app.sequences.transactions.issue();

        app.apply(Message::Transactions {
            seq: new,
            result: Ok(vec![view("new", KindWire::Income, 1.0, "USD")]),
        });
        app.apply(Message::Transactions {
            seq: old,
            result: Ok(vec![view("old", KindWire::Income, 1.0, "USD")]),
        });

        assert_eq!(ids(&app.state.transactions.items), ["new"]);
        assert!(!app.state.transactions.loading);
    }

    #[test]
    fn failed_list_keeps_previous_items() {
        let mut app = app();
        let seq = app.sequences.transactions.issue();
        app.apply(Message::Transactions {
            seq,
            result: Ok(vec![view("a", KindWire::Expense, 3.0, "USD")]),
        });

        let seq = app.sequences.transactions.issue();
        app.apply(Message::Transactions {
            seq,
            result: Err(ClientError::Server("down".to_string())),
        });

        assert_eq!(ids(&app.state.transactions.items), ["a"]);
        assert!(app.state.transactions.error.is_some());
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
    }

    #[test]
    fn failed_rates_warn_and_fall_back() {
        let mut app = app();
        app.apply(Message::Rates(Err(ClientError::NotFound("x".to_string()))));
        assert!(app.state.ctx.rates.is_empty());
        assert_eq!(app.state.toast.as_ref().unwrap().level, ToastLevel::Warning);
    }

    #[test]
    fn summary_uses_loaded_rates() {
        let mut app = app();
        app.apply(Message::Rates(Ok(RatesResponse {
            base: Some("USD".to_string()),
            rates: HashMap::from([("EUR".to_string(), 0.9)]),
        })));
        let seq = app.sequences.transactions.issue();
        app.apply(Message::Transactions {
            seq,
            result: Ok(vec![
                view("pay", KindWire::Income, 100.0, "USD"),
                view("lunch", KindWire::Expense, 30.0, "USD"),
                view("dinner", KindWire::Expense, 20.0, "EUR"),
            ]),
        });

        let summary = app.state.summary();
        assert_eq!(summary.totals.income, 100.0);
        assert!((summary.totals.expenses - 52.222).abs() < 1e-3);
        assert!(summary.unpriced.is_empty());
        assert_eq!(summary.breakdown.len(), 1);
        assert_eq!(summary.budget, BudgetStatus::Unset);
    }

    #[test]
    fn unknown_currency_is_reported_as_unpriced() {
        let mut app = app();
        let seq = app.sequences.transactions.issue();
        app.apply(Message::Transactions {
            seq,
            result: Ok(vec![view("a", KindWire::Expense, 5.0, "CHF")]),
        });
        let unpriced = app.state.summary().unpriced;
        assert!(unpriced.iter().any(|code| code.code() == "CHF"));
    }

    #[test]
    fn budget_alert_follows_a_change() {
        let mut app = app();
        let seq = app.sequences.budget.issue();
        app.alert_after = Some(seq);
        app.apply(Message::Budget {
            seq,
            result: Ok((
                Some(BudgetWire {
                    amount: 100.0,
                    currency: Some("USD".to_string()),
                }),
                vec![view("a", KindWire::Expense, 85.0, "USD")],
            )),
        });

        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Warning);
        assert!(toast.message.contains("80%"));
        assert_eq!(app.alert_after, None);
    }

    fn budget_reply(seq: u64, spent: f64) -> Message {
        Message::Budget {
            seq,
            result: Ok((
                Some(BudgetWire {
                    amount: 100.0,
                    currency: Some("USD".to_string()),
                }),
                vec![view("a", KindWire::Expense, spent, "USD")],
            )),
        }
    }

    #[test]
    fn budget_alert_waits_for_the_reload_after_a_change() {
        let mut app = app();
        let before_change = app.sequences.budget.issue();
        let after_change = app.sequences.budget.issue();
        app.alert_after = Some(after_change);

        app.apply(budget_reply(before_change, 10.0));
        assert!(app.state.toast.is_none());
        assert_eq!(app.alert_after, Some(after_change));

        app.apply(budget_reply(after_change, 95.0));
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Warning);
        assert_eq!(app.alert_after, None);
    }

    #[test]
    fn plain_budget_reload_raises_no_alert() {
        let mut app = app();
        let seq = app.sequences.budget.issue();
        app.apply(Message::Budget {
            seq,
            result: Ok((
                Some(BudgetWire {
                    amount: 100.0,
                    currency: None,
                }),
                vec![view("a", KindWire::Expense, 150.0, "USD")],
            )),
        });
        assert!(app.state.toast.is_none());
        let usage = *app.state.summary().budget.usage().unwrap();
        assert_eq!(usage.remaining, -50.0);
    }

    #[tokio::test]
    async fn currency_selector_cycles_display() {
        let mut app = app();
        assert_eq!(app.state.ctx.display.code(), "USD");
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state.ctx.display.code(), "EUR");
        assert!(app.sequences.transactions.pending());
        assert!(app.sequences.budget.pending());
    }

    #[tokio::test]
    async fn filters_cycle_through_all_values() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.state.filters.kind, Some(TransactionKind::Income));
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.state.filters.kind, None);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.state.filters.category.as_deref(), Some("Food"));
        assert_eq!(app.state.filters.query().category.as_deref(), Some("Food"));
    }

    #[test]
    fn delete_asks_for_confirmation() {
        let mut app = app();
        let seq = app.sequences.transactions.issue();
        app.apply(Message::Transactions {
            seq,
            result: Ok(vec![view("a", KindWire::Expense, 3.0, "USD")]),
        });

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.state.mode, Mode::Browse);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.state.mode, Mode::ConfirmDelete { ref id, .. } if id == "a"));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state.mode, Mode::Browse);
    }

    #[test]
    fn invalid_form_is_not_submitted() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.state.mode, Mode::AddTransaction);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, Mode::AddTransaction);
        assert!(app.state.form.error.is_some());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.mode, Mode::Browse);
    }

    #[test]
    fn typing_q_in_a_form_does_not_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.state.budget_form.amount, "q");

        press(&mut app, KeyCode::Enter);
        assert!(app.state.budget_form.error.is_some());
    }
}
