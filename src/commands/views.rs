//! Handlers for the read-only pages and for route resolution.

use crate::args::{ReportsArgs, RouteArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::pages::{Books, DashboardView, ProfileView, ReportView, SettingsView};
use crate::routes::{self, Resolution};
use crate::{Config, Result};
use anyhow::anyhow;

/// Resolves a path to the page it shows. Unknown paths are not an error; they resolve to
/// `not_found`.
pub fn route(args: &RouteArgs) -> Result<Out<Resolution>> {
    let resolution = routes::resolve(args.path());
    let message = match &resolution {
        Resolution::Page { page } => format!("{} shows the {} page", args.path(), page.title()),
        Resolution::Redirect { to } => format!("{} redirects to {}", args.path(), to.path()),
        Resolution::NotFound { path } => format!("No page at '{path}'"),
    };
    Ok(Out::new(message, resolution))
}

pub fn dashboard(books: &Books) -> Result<Out<DashboardView>> {
    let view = books.dashboard();
    let message = format!(
        "Revenue {}, outstanding {}, expenses {}, net profit {}",
        view.metrics.total_revenue,
        view.metrics.outstanding,
        view.metrics.monthly_expenses,
        view.metrics.net_profit
    );
    Ok(Out::new(message, view))
}

/// Shows the report for the chosen period and tab.
///
/// # Errors
/// - Returns a not-found error if there are no report periods at all.
pub fn reports(books: &mut Books, args: &ReportsArgs) -> Result<Out<ReportView>> {
    let page = &mut books.reports;
    if let Some(period) = args.period() {
        page.select(period);
    }
    page.set_tab(args.tab());
    let view = page
        .view()
        .ok_or_else(|| anyhow!("There are no report periods"))
        .pub_result(ErrorType::NotFound)?;
    let message = format!("{} report for {}", args.tab(), view.metrics.label);
    Ok(Out::new(message, view))
}

pub fn settings(config: &Config) -> Result<Out<SettingsView>> {
    Ok(Out::new(
        format!("Settings from {}", config.config_path().display()),
        SettingsView::new(config),
    ))
}

pub fn profile(config: &Config) -> Result<Out<ProfileView>> {
    let view = ProfileView::new(config);
    let message = if view.name.is_empty() {
        "No profile name is set".to_string()
    } else {
        format!("Profile of {}", view.name)
    };
    Ok(Out::new(message, view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_type;
    use crate::model::{Amount, SeedData};
    use crate::pages::{ReportSection, ReportTab};
    use crate::routes::Page;
    use crate::test::TestEnv;
    use rust_decimal::Decimal;

    #[test]
    fn test_route_messages() {
        let out = route(&RouteArgs::new("/")).unwrap();
        assert_eq!(out.message(), "/ redirects to /dashboard");
        let out = route(&RouteArgs::new("/reports/")).unwrap();
        assert_eq!(
            out.structure(),
            Some(&Resolution::Page {
                page: Page::Reports
            })
        );
        let out = route(&RouteArgs::new("/ledger")).unwrap();
        assert_eq!(out.message(), "No page at '/ledger'");
    }

    #[tokio::test]
    async fn test_dashboard() {
        let env = TestEnv::new().await;
        let books = crate::commands::open(&env.config(), None).await.unwrap();
        let out = dashboard(&books).unwrap();
        assert_eq!(
            out.message(),
            "Revenue $2,500.00, outstanding $5,050.00, expenses $492.77, net profit $2,007.23"
        );
        assert_eq!(out.structure().unwrap().quick_actions.len(), 4);
    }

    #[tokio::test]
    async fn test_reports_tax_tab() {
        let env = TestEnv::new().await;
        let mut books = crate::commands::open(&env.config(), None).await.unwrap();
        let args = ReportsArgs::new(Some("2023-10".into()), ReportTab::Tax);
        let out = reports(&mut books, &args).unwrap();
        assert_eq!(out.message(), "tax report for October 2023");
        match &out.structure().unwrap().section {
            ReportSection::Tax(tax) => {
                assert_eq!(tax.estimated_savings, Amount::cents(212_500));
            }
            other => panic!("unexpected section {other:?}"),
        }
    }

    #[test]
    fn test_reports_without_periods() {
        let seed = SeedData {
            report_periods: Vec::new(),
            ..Default::default()
        };
        let mut books = Books::new(seed, Decimal::new(25, 2)).unwrap();
        let err = reports(&mut books, &ReportsArgs::default()).unwrap_err();
        assert_eq!(error_type(&err), Some(ErrorType::NotFound));
    }

    #[tokio::test]
    async fn test_settings_and_profile() {
        let env = TestEnv::new().await;
        let out = settings(&env.config()).unwrap();
        assert_eq!(out.structure().unwrap().preferences.invoice_prefix, "INV-");
        let out = profile(&env.config()).unwrap();
        assert_eq!(out.message(), "No profile name is set");
    }
}
