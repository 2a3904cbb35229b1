use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transaction::TransactionKind;

/// Currency codes accepted by the validator (ISO 4217 majors).
pub const VALID_CURRENCIES: [&str; 20] = [
    "USD", "EUR", "GBP", "JPY", "AUD", "CAD", "CHF", "CNY", "INR", "MXN", "SGD", "HKD", "NZD",
    "SEK", "NOK", "DKK", "ZAR", "BRL", "RUB", "KRW",
];

/// A raw, not-yet-validated transaction request.
///
/// Every field is optional because the request comes straight off the wire
/// (JSON body or CSV row); [`validate`] decides what is missing or malformed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "fromAccount", default)]
    pub from_account: Option<String>,
    #[serde(rename = "toAccount", default)]
    pub to_account: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// A single rejection reason, tied to one input field (or the synthetic
/// `accounts` cross-field key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Outcome of [`validate`]: all applicable field errors, in field order.
///
/// An empty error list means the request is acceptable. This is an expected
/// result of malformed input, never a panic and never retried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn reject(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Account identifiers are `ACC-` followed by exactly 5 uppercase
/// alphanumeric characters.
pub fn is_valid_account_id(account_id: &str) -> bool {
    match account_id.strip_prefix("ACC-") {
        Some(rest) => {
            rest.len() == 5
                && rest
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        }
        None => false,
    }
}

/// Checks a raw request against the format and range rules.
///
/// Never fails: every applicable defect is accumulated so the caller sees
/// all of them in one pass. Fields are checked independently, in the order
/// fromAccount, toAccount, amount, currency, type, accounts; the cross-field
/// `accounts` check runs regardless of whether the per-account checks passed.
pub fn validate(request: &TransactionRequest) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_account(
        &mut report,
        "fromAccount",
        "fromAccount is required",
        request.from_account.as_deref(),
    );
    check_account(
        &mut report,
        "toAccount",
        "toAccount is required",
        request.to_account.as_deref(),
    );

    match request.amount {
        None => report.reject("amount", "amount is required"),
        Some(amount) if amount <= Decimal::ZERO => {
            report.reject("amount", "Amount must be a positive number");
        }
        // Judged on the parsed decimal, trailing zeros stripped, so the rule
        // applies to the input representation rather than a float round-trip.
        Some(amount) if amount.normalize().scale() > 2 => {
            report.reject("amount", "Amount must have maximum 2 decimal places");
        }
        Some(_) => {}
    }

    match request.currency.as_deref() {
        None | Some("") => report.reject("currency", "currency is required"),
        Some(currency) => {
            if !VALID_CURRENCIES
                .iter()
                .any(|code| code.eq_ignore_ascii_case(currency))
            {
                report.reject(
                    "currency",
                    "Invalid currency code. Use valid ISO 4217 codes (e.g., USD, EUR, GBP)",
                );
            }
        }
    }

    match request.kind.as_deref() {
        None | Some("") => report.reject("type", "type is required"),
        Some(kind) => {
            if kind.parse::<TransactionKind>().is_err() {
                report.reject("type", "Type must be one of: deposit, withdrawal, transfer");
            }
        }
    }

    if request.kind.as_deref() == Some(TransactionKind::Transfer.as_str())
        && request.from_account == request.to_account
    {
        report.reject(
            "accounts",
            "fromAccount and toAccount cannot be the same for transfers",
        );
    }

    report
}

fn check_account(
    report: &mut ValidationReport,
    field: &'static str,
    required_message: &'static str,
    value: Option<&str>,
) {
    match value {
        None | Some("") => report.reject(field, required_message),
        Some(account_id) => {
            if !is_valid_account_id(account_id) {
                report.reject(
                    field,
                    "Account number must follow format ACC-XXXXX (where X is alphanumeric)",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_request() -> TransactionRequest {
        TransactionRequest {
            from_account: Some("ACC-12345".to_string()),
            to_account: Some("ACC-67890".to_string()),
            amount: Some(dec!(100.50)),
            currency: Some("USD".to_string()),
            kind: Some("transfer".to_string()),
        }
    }

    fn fields(report: &ValidationReport) -> Vec<&'static str> {
        report.errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn accepts_well_formed_request() {
        let report = validate(&valid_request());
        assert!(report.is_valid(), "unexpected errors: {report}");
    }

    #[test]
    fn account_format_is_uppercase_only() {
        for bad in ["acc-12345", "ACC-abcde", "ACC-1234", "ACC-123456", "12345"] {
            let report = validate(&TransactionRequest {
                from_account: Some(bad.to_string()),
                ..valid_request()
            });
            assert_eq!(fields(&report), vec!["fromAccount"], "input: {bad}");
        }
    }

    #[test]
    fn amount_must_be_positive() {
        for bad in [dec!(0), dec!(-5.00)] {
            let report = validate(&TransactionRequest {
                amount: Some(bad),
                ..valid_request()
            });
            assert_eq!(fields(&report), vec!["amount"]);
            assert_eq!(report.errors[0].message, "Amount must be a positive number");
        }
    }

    #[test]
    fn amount_allows_at_most_two_decimal_places() {
        let report = validate(&TransactionRequest {
            amount: Some(dec!(100.123)),
            ..valid_request()
        });
        assert_eq!(fields(&report), vec!["amount"]);
        assert!(report.errors[0].message.contains("2 decimal places"));

        // trailing zeros do not count against the limit
        for ok in [dec!(100.50), dec!(100.1200), dec!(3)] {
            assert!(
                validate(&TransactionRequest {
                    amount: Some(ok),
                    ..valid_request()
                })
                .is_valid()
            );
        }
    }

    #[test]
    fn currency_is_case_insensitive_against_allow_list() {
        for ok in ["usd", "Eur", "KRW"] {
            assert!(
                validate(&TransactionRequest {
                    currency: Some(ok.to_string()),
                    ..valid_request()
                })
                .is_valid()
            );
        }
        let report = validate(&TransactionRequest {
            currency: Some("XYZ".to_string()),
            ..valid_request()
        });
        assert_eq!(fields(&report), vec!["currency"]);
    }

    #[test]
    fn kind_must_match_exactly() {
        let report = validate(&TransactionRequest {
            kind: Some("Transfer".to_string()),
            ..valid_request()
        });
        assert_eq!(fields(&report), vec!["type"]);
    }

    #[test]
    fn transfer_to_same_account_rejected_on_synthetic_field() {
        let report = validate(&TransactionRequest {
            to_account: Some("ACC-12345".to_string()),
            ..valid_request()
        });
        assert_eq!(fields(&report), vec!["accounts"]);

        // the cross-field check is independent of per-account validity
        let report = validate(&TransactionRequest {
            from_account: Some("acc-lower".to_string()),
            to_account: Some("acc-lower".to_string()),
            ..valid_request()
        });
        assert_eq!(fields(&report), vec!["fromAccount", "toAccount", "accounts"]);
    }

    #[test]
    fn errors_accumulate_across_independent_fields() {
        let report = validate(&TransactionRequest {
            from_account: Some("acc-12345".to_string()),
            to_account: Some("ACC-67890".to_string()),
            amount: None,
            currency: Some("ABC".to_string()),
            kind: Some("deposit".to_string()),
        });
        assert!(!report.is_valid());
        assert_eq!(fields(&report), vec!["fromAccount", "amount", "currency"]);
    }

    #[test]
    fn empty_request_reports_every_required_field() {
        let report = validate(&TransactionRequest::default());
        assert_eq!(
            fields(&report),
            vec!["fromAccount", "toAccount", "amount", "currency", "type"]
        );
    }
}
