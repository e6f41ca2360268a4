//! JSON document handling
//!
//! The simulation input is one JSON document holding users, exchange rates and
//! commands. The output is a JSON array with one entry per command that has
//! something to report:
//!
//! ```json
//! [{"command": "splitPayment", "output": {...}, "timestamp": 4}]
//! ```
//!
//! Commands are kept as raw JSON values until they are run, so one malformed
//! command does not prevent the rest of the document from loading. Amounts
//! are written as JSON numbers.

use crate::core::engine::{CommandOutput, UserSummary};
use crate::core::rate_graph::RateEdge;
use crate::types::{
    format_amount, Account, Command, LedgerError, SplitInitiated, SplitOutcome, Timestamp,
    TransactionKind, TransactionRecord, UserInput,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Write};
use std::path::Path;

/// The simulation input document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDocument {
    #[serde(default)]
    pub users: Vec<UserInput>,

    #[serde(default)]
    pub exchange_rates: Vec<RateEdge>,

    /// Undecoded commands, in execution order
    #[serde(default)]
    pub commands: Vec<Value>,
}

/// Read and parse the input document
pub fn read_document(path: &Path) -> Result<InputDocument, LedgerError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LedgerError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => LedgerError::from(e),
    })?;

    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Name and timestamp of a command entry, read without decoding it
///
/// Missing fields fall back to `<unnamed>` and 0 so that a rejected entry can
/// still be reported.
pub fn command_header(value: &Value) -> (String, Timestamp) {
    let name = value
        .get("command")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string();
    let timestamp = value
        .get("timestamp")
        .and_then(Value::as_u64)
        .unwrap_or_default();
    (name, timestamp)
}

/// Decode one command entry
///
/// # Returns
///
/// * `Ok(Command)` - The decoded command
/// * `Err(LedgerError::UnknownCommand)` - If the entry names no known command
/// * `Err(LedgerError::InvalidCommand)` - If a known command lacks a required
///   field or carries a malformed one
pub fn decode_command(value: Value) -> Result<Command, LedgerError> {
    let (name, _) = command_header(&value);
    if !Command::NAMES.contains(&name.as_str()) {
        return Err(LedgerError::UnknownCommand { command: name });
    }

    serde_json::from_value(value).map_err(|e| LedgerError::invalid_command(&name, &e.to_string()))
}

/// Build the output entry for an executed command
///
/// # Returns
///
/// * `Some(entry)` - For failures and for commands that report on success
/// * `None` - For successful commands that only change state
pub fn output_entry(
    command: &str,
    timestamp: Timestamp,
    result: &Result<Option<CommandOutput>, LedgerError>,
) -> Option<Value> {
    let output = match result {
        Ok(None) => return None,
        Ok(Some(output)) => command_output(output, timestamp),
        Err(error) => error_output(error, timestamp),
    };

    Some(json!({
        "command": command,
        "output": output,
        "timestamp": timestamp,
    }))
}

/// Write the output document as pretty-printed JSON
pub fn write_output(entries: &[Value], output: &mut dyn Write) -> Result<(), LedgerError> {
    serde_json::to_writer_pretty(&mut *output, entries)?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn number(amount: Decimal) -> Value {
    amount.to_f64().map(Value::from).unwrap_or(Value::Null)
}

fn command_output(output: &CommandOutput, timestamp: Timestamp) -> Value {
    match output {
        CommandOutput::Users(users) => Value::Array(users.iter().map(user_json).collect()),
        CommandOutput::Transactions(records) => {
            Value::Array(records.iter().map(transaction_json).collect())
        }
        CommandOutput::SplitInitiated(initiated) => split_initiated_json(initiated),
        CommandOutput::SplitCompleted(outcome) => split_completed_json(outcome, timestamp),
    }
}

fn user_json(summary: &UserSummary) -> Value {
    json!({
        "firstName": summary.user.first_name,
        "lastName": summary.user.last_name,
        "email": summary.user.email,
        "accounts": summary.accounts.iter().map(account_json).collect::<Vec<_>>(),
    })
}

fn account_json(account: &Account) -> Value {
    let mut map = Map::new();
    map.insert("IBAN".to_string(), json!(account.iban));
    map.insert("balance".to_string(), number(account.balance));
    map.insert("currency".to_string(), json!(account.currency.code()));
    map.insert("type".to_string(), json!(account.kind.as_str()));
    if let Some(rate) = account.interest_rate {
        map.insert("interestRate".to_string(), number(rate));
    }
    Value::Object(map)
}

/// One history entry; the fields present depend on the entry kind
pub fn transaction_json(record: &TransactionRecord) -> Value {
    let mut map = Map::new();
    map.insert("timestamp".to_string(), json!(record.timestamp));
    map.insert("description".to_string(), json!(record.description));

    match record.kind {
        TransactionKind::TransferSent | TransactionKind::TransferReceived => {
            if let (Some(amount), Some(currency)) = (record.amount, &record.currency) {
                map.insert(
                    "amount".to_string(),
                    json!(format!("{} {}", format_amount(amount), currency)),
                );
            }
            map.insert("senderIBAN".to_string(), json!(record.sender));
            map.insert("receiverIBAN".to_string(), json!(record.receiver));
            map.insert("transferType".to_string(), json!(record.kind.as_str()));
        }
        TransactionKind::SplitPayment => {
            if let Some(amount) = record.amount {
                map.insert("amount".to_string(), number(amount));
            }
            map.insert("currency".to_string(), json!(record.currency.as_ref().map(|c| c.code())));
            map.insert("involvedAccounts".to_string(), json!(record.involved_accounts));
            map.insert(
                "amountForUsers".to_string(),
                Value::Array(record.amount_for_users.iter().copied().map(number).collect()),
            );
            map.insert("splitId".to_string(), json!(record.split_id));
        }
        TransactionKind::FundsAdded => {
            if let Some(amount) = record.amount {
                map.insert("amount".to_string(), number(amount));
            }
            map.insert("currency".to_string(), json!(record.currency.as_ref().map(|c| c.code())));
            map.insert("account".to_string(), json!(record.account));
        }
        TransactionKind::AccountCreated
        | TransactionKind::InsufficientFunds
        | TransactionKind::AccountDeletionFailed => {}
    }

    Value::Object(map)
}

fn split_initiated_json(initiated: &SplitInitiated) -> Value {
    json!({
        "description": initiated.description(),
        "splitId": initiated.id,
        "accounts": initiated.accounts,
        "amount": number(initiated.total),
        "currency": initiated.currency.code(),
        "timestamp": initiated.timestamp,
    })
}

fn split_completed_json(outcome: &SplitOutcome, timestamp: Timestamp) -> Value {
    json!({
        "description": "Split payment completed successfully",
        "splitId": outcome.id,
        "allInsufficientFundsAccounts": outcome.ever_insufficient,
        "timestamp": timestamp,
    })
}

/// Failure report: the error message plus whatever context the error carries
pub fn error_output(error: &LedgerError, timestamp: Timestamp) -> Value {
    let mut map = Map::new();
    map.insert("description".to_string(), json!(error.to_string()));
    map.insert("timestamp".to_string(), json!(timestamp));

    match error {
        LedgerError::SplitAccountNotFound {
            involved_accounts,
            timestamp,
            ..
        } => {
            map.insert("involvedAccounts".to_string(), json!(involved_accounts));
            map.insert("timestamp".to_string(), json!(timestamp));
        }
        LedgerError::SplitInsufficientFunds {
            split_id,
            last_account,
            timestamp,
        } => {
            map.insert("splitId".to_string(), json!(split_id));
            map.insert("lastProblematicAccount".to_string(), json!(last_account));
            map.insert("timestamp".to_string(), json!(timestamp));
        }
        LedgerError::NoPendingSplit { split_id }
        | LedgerError::SplitNotAllAccepted { split_id }
        | LedgerError::NotAParticipant { split_id, .. } => {
            map.insert("splitId".to_string(), json!(split_id));
        }
        LedgerError::InsufficientFunds { iban, .. }
        | LedgerError::AccountNotEmpty { iban, .. }
        | LedgerError::DuplicateParticipant { iban } => {
            map.insert("account".to_string(), json!(iban));
        }
        _ => {}
    }

    Value::Object(map)
}
