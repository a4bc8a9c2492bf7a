//! Client-side form validation.
//!
//! Checks run before any request is issued; a rejected form never reaches
//! the network. Each validator returns the first failing rule.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{CustomerPatch, LeadPatch, NewCustomer, NewLead};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length for login and registration.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

fn required(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

fn email(value: &str) -> ValidationResult<()> {
    required("email", value)?;
    if !is_valid_email(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn password(value: &str) -> ValidationResult<()> {
    required("password", value)?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

fn positive(field: &'static str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

pub fn validate_login(email_value: &str, password_value: &str) -> ValidationResult<()> {
    email(email_value)?;
    password(password_value)
}

pub fn validate_registration(
    name: &str,
    email_value: &str,
    password_value: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    required("name", name)?;
    email(email_value)?;
    password(password_value)?;
    if password_value != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_customer(customer: &NewCustomer) -> ValidationResult<()> {
    required("name", &customer.name)?;
    email(&customer.email)?;
    required("phone", &customer.phone)?;
    required("company", &customer.company)
}

/// Fields present in a patch obey the same rules as the full form.
pub fn validate_customer_patch(patch: &CustomerPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        required("name", name)?;
    }
    if let Some(value) = &patch.email {
        email(value)?;
    }
    if let Some(phone) = &patch.phone {
        required("phone", phone)?;
    }
    if let Some(company) = &patch.company {
        required("company", company)?;
    }
    Ok(())
}

pub fn validate_lead(lead: &NewLead) -> ValidationResult<()> {
    required("title", &lead.title)?;
    required("description", &lead.description)?;
    required("customer_id", &lead.customer_id)?;
    positive("value", lead.value)
}

pub fn validate_lead_patch(patch: &LeadPatch) -> ValidationResult<()> {
    if let Some(title) = &patch.title {
        required("title", title)?;
    }
    if let Some(description) = &patch.description {
        required("description", description)?;
    }
    if let Some(customer_id) = &patch.customer_id {
        required("customer_id", customer_id)?;
    }
    if let Some(value) = patch.value {
        positive("value", value)?;
    }
    Ok(())
}
