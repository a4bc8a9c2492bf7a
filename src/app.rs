//! Application bundle: every store wired to one HTTP client and one secure
//! store.
//!
//! Views receive an `&App` (or the individual stores) instead of reaching
//! for globals. Mutations that accept form input go through the validated
//! methods here, so rejected input never hits the network.

use std::sync::Arc;
use tracing::info;

use crate::adapters::{FileSecureStore, ReqwestHttpClient};
use crate::api::{ApiClient, AuthClient, CustomerClient, LeadClient};
use crate::config::AppConfig;
use crate::error::CrmResult;
use crate::models::{
    Customer, CustomerPatch, DashboardStats, Lead, LeadPatch, NewCustomer, NewLead, StatusFilter,
    User,
};
use crate::state::{AuthStore, CustomerStore, LeadStore, ThemeMode, ThemeStore};
use crate::traits::{HttpClient, SecureStore};
use crate::validation;

pub struct App {
    pub config: AppConfig,
    pub auth: AuthStore,
    pub customers: CustomerStore,
    pub leads: LeadStore,
    pub theme: ThemeStore,
}

impl App {
    /// Build all clients and stores around the given adapters.
    ///
    /// No I/O happens here; call [`App::start`] before reading the session.
    pub fn new(config: AppConfig, http: Arc<dyn HttpClient>, storage: Arc<dyn SecureStore>) -> Self {
        let api = ApiClient::new(config.api_base_url.clone(), Arc::clone(&http));
        let auth_api = ApiClient::new(config.auth_base_url.clone(), http);

        Self {
            auth: AuthStore::new(AuthClient::new(auth_api), Arc::clone(&storage)),
            customers: CustomerStore::new(CustomerClient::new(api.clone(), config.page_size)),
            leads: LeadStore::new(LeadClient::new(api)),
            theme: ThemeStore::new(storage),
            config,
        }
    }

    /// Production wiring: reqwest transport and the file-backed store under
    /// `config.data_dir`, with the persisted session and theme restored.
    pub async fn bootstrap(config: AppConfig) -> Self {
        let storage = Arc::new(FileSecureStore::new(&config.data_dir));
        let app = Self::new(config, Arc::new(ReqwestHttpClient::new()), storage);
        app.start(ThemeMode::default()).await;
        app
    }

    /// Restore the session and theme preference. Call exactly once.
    pub async fn start(&self, system_theme: ThemeMode) {
        self.auth.restore_session().await;
        self.theme.load(system_theme).await;
        info!(
            authenticated = self.auth.is_authenticated(),
            theme = %self.theme.mode(),
            "Client started"
        );
    }

    pub async fn login(&self, email: &str, password: &str) -> CrmResult<User> {
        validation::validate_login(email, password)?;
        Ok(self.auth.login(email.trim(), password).await?)
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> CrmResult<User> {
        validation::validate_registration(name, email, password, confirm_password)?;
        Ok(self.auth.register(email.trim(), password, name.trim()).await?)
    }

    /// Sign out and drop every cached entity.
    pub async fn logout(&self) {
        self.auth.logout().await;
        self.customers.reset();
        self.leads.reset();
    }

    pub async fn create_customer(&self, data: &NewCustomer) -> CrmResult<Customer> {
        validation::validate_customer(data)?;
        Ok(self.customers.create_customer(data).await?)
    }

    pub async fn update_customer(&self, id: &str, patch: &CustomerPatch) -> CrmResult<Customer> {
        validation::validate_customer_patch(patch)?;
        Ok(self.customers.update_customer(id, patch).await?)
    }

    pub async fn delete_customer(&self, id: &str) -> CrmResult<()> {
        Ok(self.customers.delete_customer(id).await?)
    }

    pub async fn create_lead(&self, data: &NewLead) -> CrmResult<Lead> {
        validation::validate_lead(data)?;
        Ok(self.leads.create_lead(data).await?)
    }

    pub async fn update_lead(&self, id: &str, patch: &LeadPatch) -> CrmResult<Lead> {
        validation::validate_lead_patch(patch)?;
        Ok(self.leads.update_lead(id, patch).await?)
    }

    pub async fn delete_lead(&self, id: &str) -> CrmResult<()> {
        Ok(self.leads.delete_lead(id).await?)
    }

    /// Stats over whatever is cached right now.
    pub fn dashboard(&self) -> DashboardStats {
        let leads = self.leads.snapshot().leads;
        let customers = self.customers.snapshot().customers.len();
        DashboardStats::compute(&leads, customers)
    }

    /// Load all leads and the first customer page, then compute stats.
    pub async fn load_dashboard(&self) -> CrmResult<DashboardStats> {
        self.leads.fetch_leads(None, StatusFilter::All).await?;
        self.customers.refresh().await?;
        Ok(self.dashboard())
    }
}
