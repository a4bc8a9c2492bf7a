//! Customer store: a paginated, searchable cache of the customer collection.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    append_dedup, clear_selected_if, refresh_selected, remove_by_id, replace_by_id, upsert_front,
    FetchGuard, RequestSequence,
};
use crate::api::CustomerClient;
use crate::error::StoreError;
use crate::models::{Customer, CustomerPage, CustomerPatch, EntityKind, NewCustomer};

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerState {
    pub customers: Vec<Customer>,
    pub selected: Option<Customer>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    /// Last page applied; 0 before the first fetch.
    pub current_page: u32,
    pub has_more: bool,
}

impl Default for CustomerState {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
            search_query: String::new(),
            current_page: 0,
            has_more: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CustomerAction {
    FetchStarted,
    /// Page 1 replaces the cache; later pages append.
    PageLoaded { page: u32, data: CustomerPage },
    FetchFailed(String),
    /// The latest fetch was dropped before it completed.
    FetchCancelled,
    Created(Customer),
    Updated(Customer),
    Deleted(String),
    /// A single customer fetched by id; cached and selected.
    Opened(Customer),
    Selected(Option<Customer>),
    SearchQuerySet(String),
    Reset,
}

pub fn reduce(state: &mut CustomerState, action: CustomerAction) {
    match action {
        CustomerAction::FetchStarted => state.is_loading = true,
        CustomerAction::PageLoaded { page, data } => {
            if page <= 1 {
                state.customers.clear();
            }
            append_dedup(&mut state.customers, data.customers);
            state.current_page = page;
            state.has_more = data.has_more;
            state.is_loading = false;
            state.error = None;
        }
        CustomerAction::FetchFailed(message) => {
            state.error = Some(message);
            state.is_loading = false;
        }
        CustomerAction::FetchCancelled => state.is_loading = false,
        CustomerAction::Created(customer) => upsert_front(&mut state.customers, customer),
        CustomerAction::Updated(customer) => {
            refresh_selected(&mut state.selected, &customer);
            replace_by_id(&mut state.customers, customer);
        }
        CustomerAction::Deleted(id) => {
            remove_by_id(&mut state.customers, &id);
            clear_selected_if(&mut state.selected, &id);
        }
        CustomerAction::Opened(customer) => {
            if !replace_by_id(&mut state.customers, customer.clone()) {
                state.customers.push(customer.clone());
            }
            state.selected = Some(customer);
        }
        CustomerAction::Selected(customer) => state.selected = customer,
        CustomerAction::SearchQuerySet(query) => state.search_query = query,
        CustomerAction::Reset => *state = CustomerState::default(),
    }
}

pub struct CustomerStore {
    client: CustomerClient,
    state: watch::Sender<CustomerState>,
    fetches: RequestSequence,
}

impl CustomerStore {
    pub fn new(client: CustomerClient) -> Self {
        let (state, _) = watch::channel(CustomerState::default());
        Self {
            client,
            state,
            fetches: RequestSequence::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<CustomerState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CustomerState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: CustomerAction) {
        self.state.send_modify(|state| reduce(state, action));
    }

    /// Fetch one page. Only the most recently issued fetch is applied;
    /// responses to superseded fetches are dropped.
    pub async fn fetch_customers(&self, page: u32, search: &str) -> Result<(), StoreError> {
        let ticket = self.fetches.next();
        self.dispatch(CustomerAction::FetchStarted);
        debug!(page, ticket, "Fetching customers");

        let guard = FetchGuard::new(&self.state, &self.fetches, ticket, |state| {
            reduce(state, CustomerAction::FetchCancelled)
        });
        let result = self.client.list(page, search).await;
        guard.settle();
        if !self.fetches.is_latest(ticket) {
            debug!(page, ticket, "Dropping superseded customer page");
            return Ok(());
        }

        match result {
            Ok(data) => {
                debug!(page, count = data.customers.len(), has_more = data.has_more, "Customer page loaded");
                self.dispatch(CustomerAction::PageLoaded { page, data });
                Ok(())
            }
            Err(source) => {
                warn!(page, error = %source, "Customer fetch failed");
                let err = StoreError::FetchFailed {
                    entity: EntityKind::Customer,
                    source,
                };
                self.dispatch(CustomerAction::FetchFailed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Set the query and fetch its first page.
    pub async fn search(&self, term: &str) -> Result<(), StoreError> {
        self.set_search_query(term);
        self.fetch_customers(1, term).await
    }

    /// Fetch the next page of the current query.
    ///
    /// Returns `Ok(false)` without a request when there is nothing more to
    /// load or a fetch is already running.
    pub async fn load_more(&self) -> Result<bool, StoreError> {
        let (next, query) = {
            let state = self.state.borrow();
            if !state.has_more || state.is_loading {
                return Ok(false);
            }
            (state.current_page + 1, state.search_query.clone())
        };
        self.fetch_customers(next, &query).await?;
        Ok(true)
    }

    /// Re-fetch the first page of the current query.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let query = self.state.borrow().search_query.clone();
        self.fetch_customers(1, &query).await
    }

    pub async fn create_customer(&self, data: &NewCustomer) -> Result<Customer, StoreError> {
        let customer = self.client.create(data).await.map_err(|source| {
            warn!(error = %source, "Customer create failed");
            StoreError::CreateFailed {
                entity: EntityKind::Customer,
                source,
            }
        })?;
        info!(id = %customer.id, "Customer created");
        self.dispatch(CustomerAction::Created(customer.clone()));
        Ok(customer)
    }

    pub async fn update_customer(&self, id: &str, patch: &CustomerPatch) -> Result<Customer, StoreError> {
        let customer = self.client.update(id, patch).await.map_err(|source| {
            warn!(id, error = %source, "Customer update failed");
            StoreError::UpdateFailed {
                entity: EntityKind::Customer,
                source,
            }
        })?;
        debug!(id, "Customer updated");
        self.dispatch(CustomerAction::Updated(customer.clone()));
        Ok(customer)
    }

    pub async fn delete_customer(&self, id: &str) -> Result<(), StoreError> {
        self.client.delete(id).await.map_err(|source| {
            warn!(id, error = %source, "Customer delete failed");
            StoreError::DeleteFailed {
                entity: EntityKind::Customer,
                source,
            }
        })?;
        info!(id, "Customer deleted");
        self.dispatch(CustomerAction::Deleted(id.to_string()));
        Ok(())
    }

    /// Load a customer by id into the cache and select it.
    pub async fn open_customer(&self, id: &str) -> Result<Customer, StoreError> {
        let customer = self.client.get(id).await.map_err(|source| {
            if source.is_not_found() {
                StoreError::NotFound {
                    entity: EntityKind::Customer,
                    id: id.to_string(),
                }
            } else {
                StoreError::FetchFailed {
                    entity: EntityKind::Customer,
                    source,
                }
            }
        })?;
        self.dispatch(CustomerAction::Opened(customer.clone()));
        Ok(customer)
    }

    pub fn select_customer(&self, customer: Option<Customer>) {
        self.dispatch(CustomerAction::Selected(customer));
    }

    /// Record the query without fetching; see [`CustomerStore::search`].
    pub fn set_search_query(&self, term: &str) {
        self.dispatch(CustomerAction::SearchQuerySet(term.to_string()));
    }

    /// Cached customers matching the current query.
    pub fn filtered(&self) -> Vec<Customer> {
        let state = self.state.borrow();
        state
            .customers
            .iter()
            .filter(|c| c.matches(&state.search_query))
            .cloned()
            .collect()
    }

    pub fn reset(&self) {
        self.dispatch(CustomerAction::Reset);
    }
}
