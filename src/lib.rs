/// Transaction record model: kinds, status and the immutable record itself.
pub mod transaction;

/// Pure request validation: checks a raw transaction request against the
/// format and range rules, accumulating every field error in one pass.
pub mod validator;

/// Transaction ledger interface, plus the "in memory" implementation and a
/// lock-guarded shared handle for multi-threaded hosts.
///
/// NOTE: the interface is not strictly necessary, but it is a good
/// integration point to swap the in-memory implementation for something
/// more sophisticated.
pub mod ledger;

/// CSV plumbing and service bootstrap for the binary. Could live in its own
/// crate, but the integration test drives it too, so it stays here.
pub mod bin_utils;
