//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Type, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{Error, database_id::TransactionId, transaction::range::parse_date};

/// The maximum number of characters allowed in a transaction description.
pub const DESCRIPTION_MAX_LENGTH: usize = 200;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in the API and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money spent or earned, never negative.
    pub amount: f64,
    /// A free text label for grouping transactions, e.g. "Food".
    pub category: String,
    /// A text description of what the transaction was for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// When the transaction was saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last written to.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        transaction_type: TransactionType,
        amount: f64,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            transaction_type,
            amount,
            category: category.to_owned(),
            description: None,
            date: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The builder is checked when it is saved with [create_transaction].
///
/// # Examples
///
/// ```ignore
/// use time::macros::datetime;
///
/// let transaction = Transaction::build(TransactionType::Expense, 45.99, "Food")
///     .description("Coffee shop purchase")
///     .date(datetime!(2025-01-15 08:30 UTC));
/// let transaction = create_transaction(transaction, &connection)?;
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,

    /// The amount of money, must be zero or greater.
    pub amount: f64,

    /// The label used to group transactions in summaries.
    ///
    /// # Examples
    /// - `"Salary"`
    /// - `"Food"`
    /// - `"Rent"`
    pub category: String,

    /// An optional note, trimmed and at most [DESCRIPTION_MAX_LENGTH] characters.
    pub description: Option<String>,

    /// When the transaction happened. Defaults to the time it was saved.
    pub date: Option<OffsetDateTime>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Set the date the transaction happened on.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }
}

/// An amount as sent by a client, either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number.
    Number(f64),
    /// A string that should contain a number, e.g. from an HTML form.
    Text(String),
}

impl AmountInput {
    fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(text) if text.trim().is_empty())
    }

    fn into_number(self) -> Result<f64, Error> {
        match self {
            AmountInput::Number(number) => Ok(number),
            AmountInput::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| Error::InvalidAmount(text)),
        }
    }
}

/// The unchecked fields for creating a transaction, from a JSON body or a form.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionPayload {
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// The amount of money.
    pub amount: Option<AmountInput>,
    /// The category label.
    pub category: Option<String>,
    /// An optional description.
    pub description: Option<String>,
    /// A `YYYY-MM-DD` date or an RFC 3339 timestamp.
    pub date: Option<String>,
}

impl TransactionPayload {
    /// Check the required fields are present and convert them to their typed form.
    ///
    /// Empty strings are treated as missing.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] if the type, amount or category is missing,
    /// - [Error::InvalidType] if the type is not "income" or "expense",
    /// - [Error::InvalidAmount] if the amount is not a number,
    /// - or [Error::InvalidDate] if the date is given but cannot be parsed.
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let transaction_type = non_empty(self.transaction_type);
        let amount = self.amount.filter(|amount| !amount.is_blank());
        let category = non_empty(self.category);

        let (Some(transaction_type), Some(amount), Some(category)) =
            (transaction_type, amount, category)
        else {
            return Err(Error::MissingFields);
        };

        let transaction_type: TransactionType = transaction_type.parse()?;
        let amount = amount.into_number()?;
        let mut builder = Transaction::build(transaction_type, amount, &category);

        if let Some(description) = self.description {
            builder = builder.description(&description);
        }

        if let Some(date) = non_empty(self.date) {
            builder = builder.date(parse_transaction_date(&date)?);
        }

        Ok(builder)
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|text| !text.trim().is_empty())
}

/// Parse a transaction date from either a `YYYY-MM-DD` date, which is taken
/// as midnight UTC, or an RFC 3339 timestamp.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is neither format.
pub fn parse_transaction_date(text: &str) -> Result<OffsetDateTime, Error> {
    if let Ok(date) = parse_date(text) {
        return Ok(date.midnight().assume_utc());
    }

    OffsetDateTime::parse(text.trim(), &Rfc3339)
        .map(|timestamp| timestamp.to_offset(UtcOffset::UTC))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Convert a timestamp to the number of milliseconds since the Unix epoch.
///
/// Timestamps are stored with millisecond precision, anything finer is dropped.
pub(crate) fn to_unix_millis(timestamp: OffsetDateTime) -> i64 {
    timestamp.unix_timestamp_nanos().div_euclid(1_000_000) as i64
}

fn get_timestamp(row: &Row, index: usize) -> Result<OffsetDateTime, rusqlite::Error> {
    let millis: i64 = row.get(index)?;

    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Integer, Box::new(error))
    })
}

/// Create a new transaction in the database from a builder.
///
/// The category and description are trimmed, an empty description is saved
/// as no description and a missing date is set to the current time.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingFields] if the category is blank,
/// - [Error::InvalidAmount] if the amount is not finite,
/// - [Error::NegativeAmount] if the amount is less than zero,
/// - [Error::DescriptionTooLong] if the description is longer than [DESCRIPTION_MAX_LENGTH] characters,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let category = builder.category.trim();
    if category.is_empty() {
        return Err(Error::MissingFields);
    }

    if !builder.amount.is_finite() {
        return Err(Error::InvalidAmount(builder.amount.to_string()));
    }

    if builder.amount < 0.0 {
        return Err(Error::NegativeAmount(builder.amount));
    }

    // Normalizes negative zero.
    let amount = builder.amount.abs();

    let description = builder
        .description
        .as_deref()
        .map(str::trim)
        .filter(|description| !description.is_empty());

    if let Some(description) = description {
        let length = description.chars().count();
        if length > DESCRIPTION_MAX_LENGTH {
            return Err(Error::DescriptionTooLong(length));
        }
    }

    let now = to_unix_millis(OffsetDateTime::now_utc());
    let date = builder.date.map(to_unix_millis).unwrap_or(now);

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (type, amount, category, description, date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             RETURNING id, type, amount, category, description, date, created_at, updated_at",
        )?
        .query_row(
            (
                builder.transaction_type,
                amount,
                category,
                description,
                date,
                now,
            ),
            map_transaction_row,
        )?;

    tracing::info!(
        "created {} transaction {} for {amount} in \"{category}\"",
        transaction.transaction_type,
        transaction.id
    );

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                amount REAL NOT NULL CHECK (amount >= 0),
                category TEXT NOT NULL,
                description TEXT,
                date INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
                )",
        (),
    )?;

    // Used by the listing and summary queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_type_date ON \"transaction\"(type, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        transaction_type: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        date: get_timestamp(row, 5)?,
        created_at: get_timestamp(row, 6)?,
        updated_at: get_timestamp(row, 7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
