//! Input state of the add-transaction and budget forms.
//!
//! Both forms validate locally before anything is sent, so a rejected input never costs
//! a network round trip.

use api_types::{
    budget::BudgetSet,
    transaction::{TransactionKind as KindWire, TransactionNew},
};
use chrono::NaiveDate;
use engine::{CurrencyCode, TransactionKind, money::parse_amount, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Description,
    Amount,
    Category,
    Date,
}

impl FormField {
    const ORDER: [Self; 5] = [
        Self::Kind,
        Self::Description,
        Self::Amount,
        Self::Category,
        Self::Date,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    /// Choice fields are cycled with Up/Down instead of typed into.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Kind | Self::Category)
    }

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn all() -> [Self; 5] {
        Self::ORDER
    }
}

#[derive(Debug, Clone)]
pub struct TransactionForm {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: String,
    pub category: usize,
    pub date: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Expense,
            description: String::new(),
            amount: String::new(),
            category: 0,
            date: today.format("%Y-%m-%d").to_string(),
            focus: FormField::Kind,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Description => Some(&mut self.description),
            FormField::Amount => Some(&mut self.amount),
            FormField::Date => Some(&mut self.date),
            FormField::Kind | FormField::Category => None,
        }
    }

    pub fn input(&mut self, ch: char) {
        if let Some(text) = self.text_mut() {
            text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    /// Cycles the focused choice field. `categories` is the configured category list.
    pub fn cycle(&mut self, forward: bool, categories: usize) {
        match self.focus {
            FormField::Kind => {
                self.kind = match self.kind {
                    TransactionKind::Income => TransactionKind::Expense,
                    TransactionKind::Expense => TransactionKind::Income,
                };
            }
            FormField::Category if categories > 0 => {
                self.category = if forward {
                    (self.category + 1) % categories
                } else {
                    (self.category + categories - 1) % categories
                };
            }
            _ => {}
        }
    }

    /// Value shown for `field`.
    pub fn value<'a>(&'a self, field: FormField, categories: &'a [String]) -> &'a str {
        match field {
            FormField::Kind => self.kind.as_str(),
            FormField::Description => &self.description,
            FormField::Amount => &self.amount,
            FormField::Category => categories
                .get(self.category)
                .map(String::as_str)
                .unwrap_or(""),
            FormField::Date => &self.date,
        }
    }

    /// Validates the inputs and builds the request body. New records are stored in the
    /// current display currency.
    pub fn build(
        &self,
        categories: &[String],
        currency: &CurrencyCode,
    ) -> Result<TransactionNew, String> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Please enter a description".to_string());
        }
        let amount = parse_amount(&self.amount).map_err(|err| err.to_string())?;
        let category = categories
            .get(self.category)
            .ok_or_else(|| "Please choose a category".to_string())?;
        let date = parse_date(&self.date).map_err(|err| err.to_string())?;

        Ok(TransactionNew {
            kind: match self.kind {
                TransactionKind::Income => KindWire::Income,
                TransactionKind::Expense => KindWire::Expense,
            },
            description: description.to_string(),
            amount,
            category: category.clone(),
            date,
            currency: Some(currency.code().to_string()),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetForm {
    pub amount: String,
    pub error: Option<String>,
}

impl BudgetForm {
    pub fn build(&self, currency: &CurrencyCode) -> Result<BudgetSet, String> {
        let amount = parse_amount(&self.amount)
            .map_err(|_| "Please enter a valid budget amount".to_string())?;
        Ok(BudgetSet {
            amount,
            currency: currency.code().to_string(),
        })
    }
}
