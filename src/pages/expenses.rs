use crate::form::{ExpenseForm, ExpensePatch};
use crate::model::{Amount, Expense};
use crate::store::{self, Choice, Filter, Store};
use crate::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// The expense list together with its search text and category filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensesPage {
    store: Store<Expense>,
    filter: Filter<String>,
}

/// Totals over the visible expenses.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub shown: usize,
    pub total: usize,
    pub total_amount: Amount,
    pub tax_deductible_amount: Amount,
    pub receipts_missing: usize,
    /// Share of the visible amount that is tax deductible, rounded to one decimal place.
    pub tax_deductible_percent: Option<Decimal>,
}

impl ExpensesPage {
    pub fn new(seed: Vec<Expense>) -> Result<Self> {
        Ok(Self {
            store: Store::new(seed)?,
            filter: Filter::all(),
        })
    }

    pub fn store(&self) -> &Store<Expense> {
        &self.store
    }

    pub fn filter(&self) -> &Filter<String> {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl AsRef<str>) {
        self.filter = self.filter.clone().with_text(text);
    }

    pub fn set_category(&mut self, category: Choice<String>) {
        self.filter = self.filter.clone().with_choice(category);
    }

    /// Every category in use, in the order each first appears.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.store
            .records()
            .iter()
            .map(|e| e.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn visible(&self) -> Vec<&Expense> {
        self.store.query(&self.filter)
    }

    pub fn summary(&self) -> ExpenseSummary {
        let visible = self.visible();
        let total_amount = store::sum(visible.iter().copied(), |e| e.amount);
        let tax_deductible_amount = store::sum_where(
            visible.iter().copied(),
            |e| e.tax_deductible,
            |e| e.amount,
        );
        ExpenseSummary {
            shown: visible.len(),
            total: self.store.len(),
            total_amount,
            tax_deductible_amount,
            receipts_missing: store::count_where(visible.iter().copied(), |e| !e.has_receipt),
            tax_deductible_percent: store::percentage(
                tax_deductible_amount.value(),
                total_amount.value(),
            )
            .map(|p| p.round_dp(1).normalize()),
        }
    }

    pub fn create(&mut self, form: &ExpenseForm) -> Result<String> {
        let expense = form.validate()?;
        let description = expense.description.clone();
        let id = self.store.create(expense)?;
        info!("Recorded expense '{description}' with id '{id}'");
        Ok(id)
    }

    pub fn update(&mut self, id: &str, patch: &ExpensePatch) -> Result<&Expense> {
        self.store.modify(id, |expense| {
            *expense = patch.apply(expense)?;
            Ok(())
        })
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }
}
