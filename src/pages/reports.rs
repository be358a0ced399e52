//! Period reports: key metrics for one month plus a tabbed breakdown.

use crate::model::{Amount, CategoryShare, ReportPeriod};
use crate::store;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The breakdown shown below the key metrics.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ReportTab {
    /// Profit margin and expense ratio.
    #[default]
    Overview,
    /// Spending by category.
    Expenses,
    /// Deductions and estimated savings.
    Tax,
    /// Period-over-period profit growth.
    Trends,
}

serde_plain::derive_display_from_serialize!(ReportTab);
serde_plain::derive_fromstr_from_deserialize!(ReportTab);

/// The selectable periods, the category breakdown and which period and tab are selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportsPage {
    periods: Vec<ReportPeriod>,
    categories: Vec<CategoryShare>,
    selected: Option<String>,
    tab: ReportTab,
    tax_rate: Decimal,
}

/// The key metric cards for one period. Ratios are whole percentages.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetrics {
    pub period: String,
    pub label: String,
    pub revenue: Amount,
    pub expenses: Amount,
    pub profit: Amount,
    pub tax_deductible: Amount,
    pub profit_margin: Option<Decimal>,
    pub expense_ratio: Option<Decimal>,
    pub tax_deductible_share: Option<Decimal>,
    pub estimated_tax_savings: Amount,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxReport {
    pub total_deductible: Amount,
    pub share_of_expenses: Option<Decimal>,
    pub tax_rate_percent: Decimal,
    pub estimated_savings: Amount,
}

/// One line of the trends table.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    pub period: String,
    pub label: String,
    pub revenue: Amount,
    pub expenses: Amount,
    pub profit: Amount,
    /// Change in profit against the period before, as a whole percentage. The oldest period has
    /// nothing to compare with and shows 0. A previous profit of zero gives `None`.
    pub growth_percent: Option<Decimal>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "tab")]
pub enum ReportSection {
    #[serde(rename_all = "camelCase")]
    Overview {
        profit_margin: Option<Decimal>,
        expense_ratio: Option<Decimal>,
    },
    Expenses {
        categories: Vec<CategoryShare>,
    },
    Tax(TaxReport),
    Trends {
        rows: Vec<TrendRow>,
    },
}

/// Everything the reports page shows for the selected period and tab.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub periods: Vec<String>,
    pub metrics: ReportMetrics,
    pub section: ReportSection,
}

/// `part / whole` as a percentage rounded to a whole number, half away from zero, so that a
/// fall of 2.5% reads as -3 just as a rise of 2.5% reads as 3.
fn whole_percent(part: Decimal, whole: Decimal) -> Option<Decimal> {
    store::percentage(part, whole)
        .map(|p| p.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

impl ReportsPage {
    /// `periods` are expected most recent first.
    pub fn new(periods: Vec<ReportPeriod>, categories: Vec<CategoryShare>, tax_rate: Decimal) -> Self {
        Self {
            periods,
            categories,
            selected: None,
            tab: ReportTab::default(),
            tax_rate,
        }
    }

    pub fn periods(&self) -> &[ReportPeriod] {
        &self.periods
    }

    pub fn categories(&self) -> &[CategoryShare] {
        &self.categories
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    pub fn tab(&self) -> ReportTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: ReportTab) {
        self.tab = tab;
    }

    /// Selects a period by its `YYYY-MM` key. Unknown keys are accepted; see [`Self::current`].
    pub fn select(&mut self, period: impl Into<String>) {
        self.selected = Some(period.into());
    }

    /// The selected period, or the most recent one when nothing (or something unknown) is
    /// selected. `None` only when there are no periods at all.
    pub fn current(&self) -> Option<&ReportPeriod> {
        if let Some(selected) = &self.selected {
            if let Some(found) = self.periods.iter().find(|p| &p.period == selected) {
                return Some(found);
            }
            debug!("No report for period '{selected}', showing the most recent period");
        }
        self.periods.first()
    }

    pub fn metrics(&self) -> Option<ReportMetrics> {
        let p = self.current()?;
        Some(ReportMetrics {
            period: p.period.clone(),
            label: p.long_label(),
            revenue: p.revenue,
            expenses: p.expenses,
            profit: p.profit,
            tax_deductible: p.tax_deductible,
            profit_margin: whole_percent(p.profit.value(), p.revenue.value()),
            expense_ratio: whole_percent(p.expenses.value(), p.revenue.value()),
            tax_deductible_share: whole_percent(p.tax_deductible.value(), p.expenses.value()),
            estimated_tax_savings: self.savings(p),
        })
    }

    pub fn tax(&self) -> Option<TaxReport> {
        let p = self.current()?;
        Some(TaxReport {
            total_deductible: p.tax_deductible,
            share_of_expenses: whole_percent(p.tax_deductible.value(), p.expenses.value()),
            tax_rate_percent: (self.tax_rate * Decimal::ONE_HUNDRED).normalize(),
            estimated_savings: self.savings(p),
        })
    }

    /// Every period with its profit growth over the period that follows it in the list.
    pub fn trends(&self) -> Vec<TrendRow> {
        self.periods
            .iter()
            .enumerate()
            .map(|(ix, p)| {
                let growth_percent = match self.periods.get(ix + 1) {
                    None => Some(Decimal::ZERO),
                    Some(previous) => whole_percent(
                        (p.profit - previous.profit).value(),
                        previous.profit.value(),
                    ),
                };
                TrendRow {
                    period: p.period.clone(),
                    label: p.short_label(),
                    revenue: p.revenue,
                    expenses: p.expenses,
                    profit: p.profit,
                    growth_percent,
                }
            })
            .collect()
    }

    pub fn view(&self) -> Option<ReportView> {
        let metrics = self.metrics()?;
        let section = match self.tab {
            ReportTab::Overview => ReportSection::Overview {
                profit_margin: metrics.profit_margin,
                expense_ratio: metrics.expense_ratio,
            },
            ReportTab::Expenses => ReportSection::Expenses {
                categories: self.categories.clone(),
            },
            ReportTab::Tax => ReportSection::Tax(self.tax()?),
            ReportTab::Trends => ReportSection::Trends {
                rows: self.trends(),
            },
        };
        Some(ReportView {
            periods: self.periods.iter().map(|p| p.period.clone()).collect(),
            metrics,
            section,
        })
    }

    /// Deductible spending times the tax rate, kept to the cent.
    fn savings(&self, period: &ReportPeriod) -> Amount {
        period.tax_deductible.scale(self.tax_rate).round_cents()
    }
}
