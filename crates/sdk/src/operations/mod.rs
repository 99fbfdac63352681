//! Wallet operations: register, login, session reads, logout, and signing.
//!
//! Each submodule implements one family of operations as an `impl` block on
//! [`Wallet`](crate::Wallet). All ceremony-running operations follow the
//! pattern:
//!
//! 1. Check the cancellation token
//! 2. Validate inputs locally (no I/O on bad input)
//! 3. Take the per-email in-flight guard
//! 4. Run the flow: challenge fetch, ceremony (bounded by the configured
//!    timeout), verification, session write
//! 5. Publish the resulting [`AccountState`](crate::AccountState)

mod login;
mod register;
mod session;
mod sign;
