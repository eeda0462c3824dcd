/// Account numbers and the account aggregate.
/// Balances change only by applying events produced from validated commands
pub mod account;

/// Deposit/withdraw log entries.
pub mod transaction;

/// Ledger requests and their validation into commands executed by [`account`].
pub mod command;

/// Ledger store interface, plus "in memory" implementation.
/// Coordinates validation, balance changes and the transaction log.
///
/// NOTE: only one backend exists, the trait is the seam where a persistent
/// one would plug in without touching callers.
pub mod store;

/// Replays a CSV script of ledger requests against the in memory store.
/// Used by the binary and by integration tests.
pub mod bin_utils;
