//! Defines the endpoint for saving the settings form.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    AppState, Error, endpoints,
    preferences::{Currency, Preferences, store::PreferenceStore},
};

/// The state needed to save preferences.
#[derive(Debug, Clone)]
pub struct UpdatePreferencesState {
    /// The store holding the current preferences.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for UpdatePreferencesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            preference_store: state.preference_store.clone(),
        }
    }
}

/// The form data for the settings page.
///
/// Unchecked checkboxes are absent from the submitted form, so every toggle
/// defaults to `false`.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    /// The selected currency code, e.g. "INR".
    pub currency: Currency,
    /// The selected display language code, e.g. "en".
    pub language: String,
    /// Whether the dark mode checkbox was ticked.
    #[serde(default)]
    pub dark_mode: bool,
    /// Whether the notifications checkbox was ticked.
    #[serde(default)]
    pub notifications: bool,
    /// Whether the budget alerts checkbox was ticked.
    #[serde(default)]
    pub budget_alerts: bool,
    /// Whether the weekly reports checkbox was ticked.
    #[serde(default)]
    pub weekly_reports: bool,
    /// Whether the large transactions checkbox was ticked.
    #[serde(default)]
    pub large_transactions: bool,
}

impl From<SettingsForm> for Preferences {
    fn from(form: SettingsForm) -> Self {
        Self {
            currency: form.currency,
            language: form.language,
            dark_mode: form.dark_mode,
            notifications: form.notifications,
            budget_alerts: form.budget_alerts,
            weekly_reports: form.weekly_reports,
            large_transactions: form.large_transactions,
        }
    }
}

/// A route handler for saving the settings form, redirects back to the
/// settings view on success.
pub async fn update_preferences_endpoint(
    State(state): State<UpdatePreferencesState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    let mut store = match state.preference_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire preference store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    if let Err(error) = store.set(form.into()) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::SETTINGS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
