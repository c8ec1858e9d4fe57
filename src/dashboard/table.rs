//! The table of transactions shown on the dashboard.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, TransactionType},
};

/// The text shown in the table when no transactions match the filters.
pub(super) const NO_TRANSACTIONS_MESSAGE: &str = "No transactions found.";

const INCOME_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-green-800 bg-green-100 rounded-full \
    dark:bg-green-900 dark:text-green-300";

const EXPENSE_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-red-800 bg-red-100 rounded-full \
    dark:bg-red-900 dark:text-red-300";

/// Renders the transactions in the order given, one row each.
pub(super) fn transactions_table(transactions: &[Transaction]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row(transaction))
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                (NO_TRANSACTIONS_MESSAGE)
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let badge_style = match transaction.transaction_type {
        TransactionType::Income => INCOME_BADGE_STYLE,
        TransactionType::Expense => EXPENSE_BADGE_STYLE,
    };

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (transaction.date.date()) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(badge_style) { (transaction.transaction_type) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE) { (transaction.description.as_deref().unwrap_or_default()) }
        }
    }
}
