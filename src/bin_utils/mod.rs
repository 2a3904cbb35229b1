//! This module could be a separate crate on its own, to bootstrap [`bank_ledger`]
//! within a binary, but for simplicity purposes I include it directly here.
//! It stands in for the HTTP layer: parse a request, validate it, create the
//! transaction, and render the resulting log as CSV.

use std::io::{Read, Write};

use anyhow::Result;
use csv_export::export_transactions;
use csv_parser::CsvRequestParser;
use thiserror::Error;

use crate::ledger::in_memory::InMemoryLedger;
use crate::ledger::{ListFilter, TransactionLedger};
use crate::transaction::TransactionKind;
use crate::validator::{TransactionRequest, ValidationReport, validate};

pub mod csv_export;
pub mod csv_parser;

/// Why a CSV row did not make it into the ledger.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error("Validation failed: {0}")]
    Rejected(ValidationReport),
}

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, RequestError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvRequestParser::new(self.input);

        let mut ledger = InMemoryLedger::new();

        for (line, row) in parser {
            match row {
                Ok(request) => {
                    let report = validate(&request);
                    if report.is_valid() {
                        record(&mut ledger, &request);
                    } else {
                        (self.error_printer)(line, RequestError::Rejected(report));
                    }
                }
                Err(err) => (self.error_printer)(line, err.into()),
            }
        }

        let log = ledger.list(&ListFilter::default());
        export_transactions(self.output, log.iter())
    }
}

/// Creates the transaction for a request that already passed validation.
/// A valid request always has every field present, so the misses here are
/// unreachable; they are skipped rather than unwrapped.
fn record(ledger: &mut InMemoryLedger, request: &TransactionRequest) {
    if let (Some(from_account), Some(to_account), Some(amount), Some(currency), Some(Ok(kind))) = (
        request.from_account.as_deref(),
        request.to_account.as_deref(),
        request.amount,
        request.currency.as_deref(),
        request.kind.as_deref().map(str::parse::<TransactionKind>),
    ) {
        ledger.create(from_account, to_account, amount, currency, kind);
    }
}
