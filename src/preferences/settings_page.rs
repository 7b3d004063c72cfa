//! Defines the route handler for the settings page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CHECKBOX_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, base, loading_spinner,
    },
    navigation::NavBar,
    preferences::{CURRENCIES, Preferences, store::PreferenceStore},
};

/// The display languages offered on the settings page as (code, name) pairs.
const LANGUAGES: &[(&str, &str)] = &[("en", "English")];

fn checkbox_row(name: &str, label: &str, description: &str, checked: bool) -> Markup {
    html! {
        label class="flex items-start gap-3 cursor-pointer"
        {
            // Unchecked boxes are absent from the form data, so the endpoint
            // treats a missing field as false.
            input
                name=(name)
                type="checkbox"
                value="true"
                checked[checked]
                class=(FORM_CHECKBOX_STYLE);

            span class="flex flex-col"
            {
                span class="text-sm font-medium" { (label) }
                span class="text-xs text-gray-500 dark:text-gray-400" { (description) }
            }
        }
    }
}

fn settings_view(preferences: &Preferences) -> Markup {
    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::SETTINGS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Settings" }

                div
                {
                    label
                        for="currency"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Currency"
                    }

                    select
                        name="currency"
                        id="currency"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for &currency in CURRENCIES {
                            option
                                value=(currency.code())
                                selected[currency == preferences.currency]
                            {
                                (currency.symbol()) " " (currency.name())
                            }
                        }
                    }
                }

                div
                {
                    label
                        for="language"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Language"
                    }

                    select
                        name="language"
                        id="language"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for &(code, name) in LANGUAGES {
                            option value=(code) selected[code == preferences.language] { (name) }
                        }
                    }
                }

                fieldset class="space-y-3"
                {
                    legend class=(FORM_LABEL_STYLE) { "Appearance" }

                    (checkbox_row(
                        "dark_mode",
                        "Dark mode",
                        "Use the dark color scheme everywhere.",
                        preferences.dark_mode,
                    ))
                }

                fieldset class="space-y-3"
                {
                    legend class=(FORM_LABEL_STYLE) { "Notifications" }

                    (checkbox_row(
                        "notifications",
                        "Enable notifications",
                        "Master switch for all notifications.",
                        preferences.notifications,
                    ))
                    (checkbox_row(
                        "budget_alerts",
                        "Budget alerts",
                        "Warn when spending approaches a budget.",
                        preferences.budget_alerts,
                    ))
                    (checkbox_row(
                        "weekly_reports",
                        "Weekly reports",
                        "Send a summary of the week's activity.",
                        preferences.weekly_reports,
                    ))
                    (checkbox_row(
                        "large_transactions",
                        "Large transactions",
                        "Alert on unusually large transactions.",
                        preferences.large_transactions,
                    ))
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save Settings"
                }
            }
        }
    };

    base("Settings", &[], &content)
}

/// The state needed to display the settings page.
#[derive(Debug, Clone)]
pub struct SettingsPageState {
    /// The store holding the current preferences.
    pub preference_store: Arc<Mutex<PreferenceStore>>,
}

impl FromRef<AppState> for SettingsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            preference_store: state.preference_store.clone(),
        }
    }
}

/// Renders the settings page with the stored preferences prefilled.
pub async fn get_settings_page(State(state): State<SettingsPageState>) -> Result<Response, Error> {
    let store = state
        .preference_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire preference store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    Ok(settings_view(store.get()).into_response())
}
