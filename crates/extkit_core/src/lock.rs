//! Caller-supplied lock tokens.
//!
//! A lock token is any `Mutex` the caller owns. Helpers hold its guard for the
//! whole wrapped operation; dropping the guard releases it on every exit path.

use crate::error::{ExtError, ExtResult};
use log::warn;
use std::sync::{Mutex, MutexGuard};

/// Acquires `token`, blocking while another thread holds it.
///
/// # Errors
/// - `InvalidOperation` when a previous holder panicked and poisoned the token.
pub(crate) fn acquire<'a, L>(
    token: &'a Mutex<L>,
    operation: &'static str,
) -> ExtResult<MutexGuard<'a, L>> {
    token.lock().map_err(|_| {
        warn!("event=lock_poisoned module=lock status=error operation={operation}");
        ExtError::InvalidOperation(format!("lock token poisoned during `{operation}`"))
    })
}

/// Runs `f` while holding `token`.
pub fn with_lock<L, R>(token: &Mutex<L>, f: impl FnOnce() -> R) -> ExtResult<R> {
    let _guard = acquire(token, "with_lock")?;
    Ok(f())
}
