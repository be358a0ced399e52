//! The navigable pages and how paths resolve to them.

use serde::{Deserialize, Serialize};

/// A page of the application.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Invoices,
    Expenses,
    Clients,
    Reports,
    Settings,
    Profile,
}

serde_plain::derive_display_from_serialize!(Page);
serde_plain::derive_fromstr_from_deserialize!(Page);

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Invoices,
        Page::Expenses,
        Page::Clients,
        Page::Reports,
        Page::Settings,
        Page::Profile,
    ];

    /// The page that `/` leads to.
    pub const HOME: Page = Page::Dashboard;

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/dashboard",
            Page::Invoices => "/invoices",
            Page::Expenses => "/expenses",
            Page::Clients => "/clients",
            Page::Reports => "/reports",
            Page::Settings => "/settings",
            Page::Profile => "/profile",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Invoices => "Invoices",
            Page::Expenses => "Expenses",
            Page::Clients => "Clients",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
            Page::Profile => "Profile",
        }
    }
}

/// What a path resolves to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Resolution {
    Page { page: Page },
    Redirect { to: Page },
    NotFound { path: String },
}

/// Resolves `path` to a page. A trailing slash is ignored and `/` redirects to the dashboard.
/// Matching is exact and case-sensitive.
pub fn resolve(path: &str) -> Resolution {
    let trimmed = path.trim();
    let normalized = match trimmed.trim_end_matches('/') {
        "" if trimmed.starts_with('/') => "/",
        other => other,
    };
    if normalized == "/" {
        return Resolution::Redirect { to: Page::HOME };
    }
    match Page::ALL.iter().find(|p| p.path() == normalized) {
        Some(page) => Resolution::Page { page: *page },
        None => Resolution::NotFound {
            path: path.to_string(),
        },
    }
}
