//! The pluggable capability surface exposed to tag authors.

mod default;
mod store;

pub use default::{Builtin, DefaultProvider, Handler};
pub use store::{MemoryStore, VariableStore};

use crate::error::FunctionError;

/// The set of named callables available to tag authors.
///
/// The renderer treats the provider purely as a capability object: each
/// call group's name and already-evaluated arguments go through
/// [`invoke`](FunctionProvider::invoke), and
/// [`fallback`](FunctionProvider::fallback) is consulted when a call
/// fails.
///
/// Calls are synchronous. A provider backed by I/O blocks inside
/// `invoke`; an async embedder runs the whole render on a blocking
/// thread. The renderer itself has no suspension points, which is what
/// makes its left-to-right, all-arguments-before-call ordering
/// structural.
pub trait FunctionProvider {
    /// Invoke the named function with already-evaluated arguments.
    ///
    /// Unknown names must be reported as [`FunctionError::Unknown`],
    /// never silently swallowed.
    fn invoke(&mut self, name: &str, args: &[String]) -> Result<String, FunctionError>;

    /// Inline text substituted for a failed call, when set.
    fn fallback(&self) -> Option<&str> {
        None
    }
}
