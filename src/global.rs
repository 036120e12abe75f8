//! Process-wide session with an explicit `init` / `cleanup` lifecycle.
//!
//! These free functions mirror the operation surface expected by language
//! bindings: one grid per process, configured once and torn down explicitly.
//! The active [`Session`] lives behind a `RwLock`, so `init` and `cleanup`
//! are serialized against everything else while `der` and `filter` calls
//! from several threads proceed concurrently.
//!
//! ```rust
//! use chebyshev_spectral::global;
//!
//! global::init(16, 0.0, 1.0).expect("No other session active");
//! let x0 = global::pt(0).expect("Initialized");
//! assert_eq!(x0, 1.0);
//! global::cleanup().expect("Session active");
//! ```

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{ChebError, Result};
use crate::session::Session;

static ACTIVE: RwLock<Option<Session>> = RwLock::new(None);

// A panic while holding the lock cannot leave a half-built session behind:
// the slot is only ever replaced by a single assignment.
fn read_slot() -> RwLockReadGuard<'static, Option<Session>> {
    ACTIVE.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_slot() -> RwLockWriteGuard<'static, Option<Session>> {
    ACTIVE.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs `f` against the active session.
pub fn with_session<T>(f: impl FnOnce(&Session) -> Result<T>) -> Result<T> {
    let slot = read_slot();
    let session = slot.as_ref().ok_or(ChebError::NotInitialized)?;
    f(session)
}

/// Configures the process-wide grid. Fails if a session is already active.
pub fn init(n: usize, lower: f64, upper: f64) -> Result<()> {
    let mut slot = write_slot();
    if slot.is_some() {
        return Err(ChebError::AlreadyInitialized);
    }
    *slot = Some(Session::init(n, lower, upper)?);
    Ok(())
}

/// Installs an already built session. Fails if one is active.
pub fn install(session: Session) -> Result<()> {
    let mut slot = write_slot();
    if slot.is_some() {
        return Err(ChebError::AlreadyInitialized);
    }
    *slot = Some(session);
    Ok(())
}

/// Releases the process-wide grid and its transform plan.
pub fn cleanup() -> Result<()> {
    let session = write_slot().take().ok_or(ChebError::NotInitialized)?;
    debug!(n = session.n(), "global session cleanup");
    session.cleanup();
    Ok(())
}

pub fn is_initialized() -> bool {
    read_slot().is_some()
}

/// Number of collocation points.
pub fn n() -> Result<usize> {
    with_session(|s| Ok(s.n()))
}

/// Lower bound of the domain.
pub fn lower() -> Result<f64> {
    with_session(|s| Ok(s.lower()))
}

/// Upper bound of the domain.
pub fn upper() -> Result<f64> {
    with_session(|s| Ok(s.upper()))
}

/// Location of the `i`th collocation point.
pub fn pt(i: usize) -> Result<f64> {
    with_session(|s| s.pt(i))
}

/// Derivative of `v` over `[lower, upper]`, written to `dv`.
pub fn der(v: &[f64], dv: &mut [f64]) -> Result<()> {
    with_session(|s| s.der(v, dv))
}

/// Low-pass filter of `v` in Chebyshev space, in place.
pub fn filter(v: &mut [f64]) -> Result<()> {
    with_session(|s| s.filter(v))
}
