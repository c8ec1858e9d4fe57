//! Expense totals grouped by category or by calendar day.
//!
//! Income is never included in the summaries.

use std::collections::{BTreeMap, HashMap};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    transaction::{
        core::{Transaction, TransactionType},
        query::{TransactionFilter, list_transactions},
        range::DateRange,
    },
};

/// The total amount spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// The category of the expenses.
    pub category: String,
    /// The sum of the expense amounts.
    pub total_amount: f64,
}

/// The total amount spent on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    /// The UTC calendar day, serialized as `YYYY-MM-DD`.
    pub date: Date,
    /// The sum of the expense amounts.
    pub total_amount: f64,
}

/// Get the total expenses per category in `date_range`, largest total first.
///
/// Categories with the same total are ordered by name. Categories without
/// any expenses in the range are left out.
///
/// # Errors
/// Returns [Error::SqlError] if the expenses cannot be queried.
pub fn summarize_by_category(
    date_range: DateRange,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    let expenses = get_expenses(date_range, connection)?;

    Ok(group_by_category(&expenses))
}

/// Get the total expenses per UTC calendar day in `date_range`, earliest day first.
///
/// Days without any expenses are left out rather than given a zero total.
///
/// # Errors
/// Returns [Error::SqlError] if the expenses cannot be queried.
pub fn summarize_by_date(
    date_range: DateRange,
    connection: &Connection,
) -> Result<Vec<DailyTotal>, Error> {
    let expenses = get_expenses(date_range, connection)?;

    Ok(group_by_day(&expenses))
}

fn get_expenses(date_range: DateRange, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    let filter = TransactionFilter {
        date_range,
        transaction_type: Some(TransactionType::Expense),
    };

    list_transactions(&filter, connection)
}

fn group_by_category(expenses: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for expense in expenses {
        *totals.entry(expense.category.as_str()).or_insert(0.0) += expense.amount;
    }

    let mut totals: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total_amount)| CategoryTotal {
            category: category.to_owned(),
            total_amount,
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total_amount
            .total_cmp(&a.total_amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    totals
}

fn group_by_day(expenses: &[Transaction]) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<Date, f64> = BTreeMap::new();

    for expense in expenses {
        *totals.entry(expense.date.date()).or_insert(0.0) += expense.amount;
    }

    totals
        .into_iter()
        .map(|(date, total_amount)| DailyTotal { date, total_amount })
        .collect()
}
