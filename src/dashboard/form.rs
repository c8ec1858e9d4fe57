//! The form for adding a transaction from the dashboard.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::DESCRIPTION_MAX_LENGTH,
};

/// Renders the form for creating a transaction, with the date set to `today`.
///
/// The form posts to the transactions API and the alert in the response is
/// swapped into the alert container. The form is cleared after a successful submission.
pub(super) fn transaction_form(today: Date) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            id="transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            "hx-on::after-request"="if (event.detail.successful) this.reset()"
            class="w-full space-y-4"
        {
            h2 class="text-xl font-bold" { "Add Transaction" }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                select name="type" id="type" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="expense" selected { "Expense" }
                    option value="income" { "Income" }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="e.g. Food"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    maxlength=(DESCRIPTION_MAX_LENGTH)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(today)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator"
                {
                    (spinner)
                }
                " Add Transaction"
            }
        }
    }
}
