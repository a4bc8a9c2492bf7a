//! Lead store. Leads load in full per query; the status filter is applied
//! to the cached list rather than re-fetched.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    append_dedup, clear_selected_if, refresh_selected, remove_by_id, replace_by_id, upsert_front,
    FetchGuard, RequestSequence,
};
use crate::api::LeadClient;
use crate::error::StoreError;
use crate::models::{Customer, EntityKind, Lead, LeadPatch, LeadQuery, NewLead, StatusFilter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadState {
    pub leads: Vec<Lead>,
    pub selected: Option<Lead>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub status_filter: StatusFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeadAction {
    FetchStarted,
    /// Replaces the whole cache.
    Loaded(Vec<Lead>),
    FetchFailed(String),
    /// The latest fetch was dropped before it completed.
    FetchCancelled,
    Created(Lead),
    Updated(Lead),
    Deleted(String),
    Opened(Lead),
    Selected(Option<Lead>),
    StatusFilterSet(StatusFilter),
    Reset,
}

pub fn reduce(state: &mut LeadState, action: LeadAction) {
    match action {
        LeadAction::FetchStarted => state.is_loading = true,
        LeadAction::Loaded(leads) => {
            state.leads.clear();
            append_dedup(&mut state.leads, leads);
            state.is_loading = false;
            state.error = None;
        }
        LeadAction::FetchFailed(message) => {
            state.error = Some(message);
            state.is_loading = false;
        }
        LeadAction::FetchCancelled => state.is_loading = false,
        LeadAction::Created(lead) => upsert_front(&mut state.leads, lead),
        LeadAction::Updated(lead) => {
            refresh_selected(&mut state.selected, &lead);
            replace_by_id(&mut state.leads, lead);
        }
        LeadAction::Deleted(id) => {
            remove_by_id(&mut state.leads, &id);
            clear_selected_if(&mut state.selected, &id);
        }
        LeadAction::Opened(lead) => {
            if !replace_by_id(&mut state.leads, lead.clone()) {
                state.leads.push(lead.clone());
            }
            state.selected = Some(lead);
        }
        LeadAction::Selected(lead) => state.selected = lead,
        LeadAction::StatusFilterSet(filter) => state.status_filter = filter,
        LeadAction::Reset => *state = LeadState::default(),
    }
}

pub struct LeadStore {
    client: LeadClient,
    state: watch::Sender<LeadState>,
    fetches: RequestSequence,
}

impl LeadStore {
    pub fn new(client: LeadClient) -> Self {
        let (state, _) = watch::channel(LeadState::default());
        Self {
            client,
            state,
            fetches: RequestSequence::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LeadState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> LeadState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: LeadAction) {
        self.state.send_modify(|state| reduce(state, action));
    }

    /// Replace the cache with the leads matching the server-side filters.
    /// `StatusFilter::All` sends no status parameter.
    pub async fn fetch_leads(
        &self,
        customer_id: Option<&str>,
        status: StatusFilter,
    ) -> Result<(), StoreError> {
        let query = LeadQuery::new(customer_id, status);
        let ticket = self.fetches.next();
        self.dispatch(LeadAction::FetchStarted);
        debug!(?query, ticket, "Fetching leads");

        let guard = FetchGuard::new(&self.state, &self.fetches, ticket, |state| {
            reduce(state, LeadAction::FetchCancelled)
        });
        let result = self.client.list(&query).await;
        guard.settle();
        if !self.fetches.is_latest(ticket) {
            debug!(ticket, "Dropping superseded lead list");
            return Ok(());
        }

        match result {
            Ok(leads) => {
                debug!(count = leads.len(), "Leads loaded");
                self.dispatch(LeadAction::Loaded(leads));
                Ok(())
            }
            Err(source) => {
                warn!(error = %source, "Lead fetch failed");
                let err = StoreError::FetchFailed {
                    entity: EntityKind::Lead,
                    source,
                };
                self.dispatch(LeadAction::FetchFailed(err.to_string()));
                Err(err)
            }
        }
    }

    pub async fn create_lead(&self, data: &NewLead) -> Result<Lead, StoreError> {
        let lead = self.client.create(data).await.map_err(|source| {
            warn!(error = %source, "Lead create failed");
            StoreError::CreateFailed {
                entity: EntityKind::Lead,
                source,
            }
        })?;
        info!(id = %lead.id, customer_id = %lead.customer_id, "Lead created");
        self.dispatch(LeadAction::Created(lead.clone()));
        Ok(lead)
    }

    pub async fn update_lead(&self, id: &str, patch: &LeadPatch) -> Result<Lead, StoreError> {
        let lead = self.client.update(id, patch).await.map_err(|source| {
            warn!(id, error = %source, "Lead update failed");
            StoreError::UpdateFailed {
                entity: EntityKind::Lead,
                source,
            }
        })?;
        self.dispatch(LeadAction::Updated(lead.clone()));
        Ok(lead)
    }

    pub async fn delete_lead(&self, id: &str) -> Result<(), StoreError> {
        self.client.delete(id).await.map_err(|source| {
            warn!(id, error = %source, "Lead delete failed");
            StoreError::DeleteFailed {
                entity: EntityKind::Lead,
                source,
            }
        })?;
        info!(id, "Lead deleted");
        self.dispatch(LeadAction::Deleted(id.to_string()));
        Ok(())
    }

    /// Load a lead by id into the cache and select it.
    pub async fn open_lead(&self, id: &str) -> Result<Lead, StoreError> {
        let lead = self.client.get(id).await.map_err(|source| {
            if source.is_not_found() {
                StoreError::NotFound {
                    entity: EntityKind::Lead,
                    id: id.to_string(),
                }
            } else {
                StoreError::FetchFailed {
                    entity: EntityKind::Lead,
                    source,
                }
            }
        })?;
        self.dispatch(LeadAction::Opened(lead.clone()));
        Ok(lead)
    }

    pub fn select_lead(&self, lead: Option<Lead>) {
        self.dispatch(LeadAction::Selected(lead));
    }

    pub fn set_status_filter(&self, filter: StatusFilter) {
        self.dispatch(LeadAction::StatusFilterSet(filter));
    }

    /// Cached leads accepted by the current status filter.
    pub fn filtered(&self) -> Vec<Lead> {
        let state = self.state.borrow();
        state
            .leads
            .iter()
            .filter(|lead| state.status_filter.accepts(lead))
            .cloned()
            .collect()
    }

    pub fn leads_for_customer(&self, customer_id: &str) -> Vec<Lead> {
        self.state
            .borrow()
            .leads
            .iter()
            .filter(|lead| lead.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Filtered leads with their customer attached where it is cached.
    /// Leads pointing at unknown or deleted customers are kept as-is.
    pub fn with_customers(&self, customers: &[Customer]) -> Vec<Lead> {
        self.filtered()
            .into_iter()
            .map(|mut lead| {
                lead.customer = customers.iter().find(|c| c.id == lead.customer_id).cloned();
                lead
            })
            .collect()
    }

    pub fn reset(&self) {
        self.dispatch(LeadAction::Reset);
    }
}
