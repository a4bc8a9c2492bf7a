//! Client-side stores.
//!
//! Each store owns its state in a `tokio::sync::watch` channel. Operations
//! apply a pure reducer through `send_modify`, so every action is atomic and
//! observers see a consistent snapshot:
//! - [`AuthStore`]: the signed-in session
//! - [`CustomerStore`]: paginated, searchable customer cache
//! - [`LeadStore`]: lead cache with a status filter
//! - [`ThemeStore`]: persisted light/dark preference

pub mod auth;
pub mod customers;
pub mod leads;
pub mod theme;

pub use auth::{AuthAction, AuthState, AuthStore};
pub use customers::{CustomerAction, CustomerState, CustomerStore};
pub use leads::{LeadAction, LeadState, LeadStore};
pub use theme::{ThemeMode, ThemeStore};

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

use crate::models::Entity;

/// Keys used in the local secure store.
pub mod keys {
    pub const AUTH_TOKEN: &str = "authToken";
    pub const USER: &str = "user";
    pub const THEME: &str = "theme";
}

/// Monotonic ticket counter for list fetches.
///
/// A fetch takes a ticket before going to the network and applies its result
/// only if no newer ticket has been issued since.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding all earlier ones.
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// Held across a list fetch's request. If the fetch future is dropped
/// before [`FetchGuard::settle`] and its ticket is still the latest, `clear`
/// runs on the state so the loading flag does not outlive the request.
pub(crate) struct FetchGuard<'a, S> {
    state: &'a watch::Sender<S>,
    sequence: &'a RequestSequence,
    ticket: u64,
    clear: fn(&mut S),
    settled: bool,
}

impl<'a, S> FetchGuard<'a, S> {
    pub(crate) fn new(
        state: &'a watch::Sender<S>,
        sequence: &'a RequestSequence,
        ticket: u64,
        clear: fn(&mut S),
    ) -> Self {
        Self {
            state,
            sequence,
            ticket,
            clear,
            settled: false,
        }
    }

    /// The request finished; the caller now owns applying its result.
    pub(crate) fn settle(mut self) {
        self.settled = true;
    }
}

impl<S> Drop for FetchGuard<'_, S> {
    fn drop(&mut self) {
        if !self.settled && self.sequence.is_latest(self.ticket) {
            tracing::debug!(ticket = self.ticket, "Fetch cancelled before completion");
            self.state.send_modify(self.clear);
        }
    }
}

/// Append `incoming`, replacing in place any entity whose id is already
/// cached.
pub(crate) fn append_dedup<T: Entity>(items: &mut Vec<T>, incoming: Vec<T>) {
    for entity in incoming {
        match items.iter_mut().find(|e| e.id() == entity.id()) {
            Some(existing) => *existing = entity,
            None => items.push(entity),
        }
    }
}

/// Insert at the front, dropping any older copy with the same id.
pub(crate) fn upsert_front<T: Entity>(items: &mut Vec<T>, entity: T) {
    items.retain(|e| e.id() != entity.id());
    items.insert(0, entity);
}

/// Replace the entity with a matching id. Returns false if none matched.
pub(crate) fn replace_by_id<T: Entity>(items: &mut [T], entity: T) -> bool {
    match items.iter_mut().find(|e| e.id() == entity.id()) {
        Some(existing) => {
            *existing = entity;
            true
        }
        None => false,
    }
}

pub(crate) fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) {
    items.retain(|e| e.id() != id);
}

/// Replace `selected` if it holds the same entity.
pub(crate) fn refresh_selected<T: Entity>(selected: &mut Option<T>, entity: &T) {
    if selected.as_ref().is_some_and(|s| s.id() == entity.id()) {
        *selected = Some(entity.clone());
    }
}

/// Clear `selected` if it holds the entity with `id`.
pub(crate) fn clear_selected_if<T: Entity>(selected: &mut Option<T>, id: &str) {
    if selected.as_ref().is_some_and(|s| s.id() == id) {
        *selected = None;
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;

    use crate::models::{Customer, Lead, LeadStatus};

    pub fn customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: format!("Customer {}", id),
            email: format!("{}@example.com", id),
            phone: "555-0100".to_string(),
            company: format!("Company {}", id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn lead(id: &str, customer_id: &str, status: LeadStatus) -> Lead {
        Lead {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            title: format!("Lead {}", id),
            description: "details".to_string(),
            status,
            value: 100.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            customer: None,
        }
    }
}
