//! Error taxonomy for the CRM client.
//!
//! | Error | Raised by | Meaning |
//! |-------|-----------|---------|
//! | [`RemoteError`] | api clients | transport failure, non-2xx status, bad body |
//! | [`StoreError`] | entity stores | coarse create/update/delete/fetch failure |
//! | [`AuthError`] | auth store | invalid credentials, registration rejected |
//! | [`ValidationError`] | validation | form rejected before any request |
//! | [`CrmError`] | `App` facade | union of all of the above |
//!
//! Each carries an [`ErrorCategory`] so callers can decide between a retry
//! affordance and a "fix your input" message.

mod auth;
mod category;
mod crm_error;
mod remote;
mod store;
mod validation;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use crm_error::{CrmError, CrmResult};
pub use remote::RemoteError;
pub use store::StoreError;
pub use validation::ValidationError;
