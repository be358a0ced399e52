use crate::form::{ClientForm, ClientPatch};
use crate::model::{Amount, Client, ClientStatus};
use crate::store::{self, Choice, Filter, Store};
use crate::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// The client list together with its search text and status filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientsPage {
    store: Store<Client>,
    filter: Filter<ClientStatus>,
}

/// Figures for the stat cards. These cover every client, not only the visible ones.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub total_clients: usize,
    pub active_clients: usize,
    pub total_revenue: Amount,
    /// `None` when there are no clients.
    pub average_revenue: Option<Amount>,
}

impl ClientsPage {
    pub fn new(seed: Vec<Client>) -> Result<Self> {
        Ok(Self {
            store: Store::new(seed)?,
            filter: Filter::all(),
        })
    }

    pub fn store(&self) -> &Store<Client> {
        &self.store
    }

    pub fn filter(&self) -> &Filter<ClientStatus> {
        &self.filter
    }

    pub fn set_search(&mut self, text: impl AsRef<str>) {
        self.filter = self.filter.clone().with_text(text);
    }

    pub fn set_status(&mut self, status: Choice<ClientStatus>) {
        self.filter = self.filter.clone().with_choice(status);
    }

    pub fn visible(&self) -> Vec<&Client> {
        self.store.query(&self.filter)
    }

    pub fn summary(&self) -> ClientSummary {
        let all = self.store.records();
        let total_revenue = store::sum(all, |c| c.total_amount);
        ClientSummary {
            total_clients: all.len(),
            active_clients: store::count_where(all, |c| c.status == ClientStatus::Active),
            total_revenue,
            average_revenue: store::average(total_revenue, all.len()).map(|a| a.round_cents()),
        }
    }

    pub fn create(&mut self, form: &ClientForm, today: NaiveDate) -> Result<String> {
        let client = form.validate_new(today)?;
        let name = client.name.clone();
        let id = self.store.create(client)?;
        info!("Added client '{name}' as {id}");
        Ok(id)
    }

    /// Edits the contact details and status of a client. Invoice totals are kept.
    pub fn edit(&mut self, id: &str, patch: &ClientPatch) -> Result<&Client> {
        self.store.modify(id, |client| {
            *client = patch.apply(client)?;
            Ok(())
        })
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }
}
