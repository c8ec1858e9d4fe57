//! Alert messages for telling the user whether an action worked.
//!
//! Alerts are HTML fragments that HTMX swaps into the `#alert-container`
//! element of the dashboard.

use maud::{Markup, html};

/// A success or error message to show the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action worked.
    Success {
        /// A short summary, e.g. "Transaction added successfully!".
        message: String,
        /// What was done.
        details: String,
    },
    /// The action failed.
    Error {
        /// A short summary, e.g. "Could not save transaction".
        message: String,
        /// What went wrong and, where possible, how to fix it.
        details: String,
    },
}

const SUCCESS_STYLE: &str = "p-4 mb-4 text-sm rounded-lg border text-green-800 \
    bg-green-50 border-green-300 dark:bg-gray-800 dark:text-green-400 \
    dark:border-green-800";

const ERROR_STYLE: &str = "p-4 mb-4 text-sm rounded-lg border text-red-800 \
    bg-red-50 border-red-300 dark:bg-gray-800 dark:text-red-400 \
    dark:border-red-800";

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div role="alert" class=(style)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-semibold" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="font-bold leading-none cursor-pointer"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
