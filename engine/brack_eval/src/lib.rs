//! Call-tree renderer for tag source.
//!
//! Consumes the token stream from `brack_lexer`, recursively parses
//! nested call groups, resolves function names against a pluggable
//! [`FunctionProvider`], and evaluates calls depth-first into the final
//! rendered string.
//!
//! # Error policy
//!
//! Two failure channels, deliberately distinct:
//!
//! - [`GrammarError`]: malformed bracket/comma structure. Fatal — the
//!   render aborts with no partial output.
//! - [`FunctionError`]: a single call failed (unknown name, bad
//!   arguments, arithmetic error, handler failure). Call-local — the
//!   error's display text (or the provider's fallback string) is
//!   rendered at the call site and the rest of the tag is unaffected.
//!
//! # Example
//!
//! ```
//! use brack_eval::{render, DefaultProvider};
//!
//! let mut provider = DefaultProvider::seeded(7);
//! let out = render("2 + 2 = [math: 2 + 2]", &mut provider).unwrap();
//! assert_eq!(out, "2 + 2 = 4");
//! ```

mod cursor;
mod error;
mod provider;
mod render;
mod stack;

pub use error::{FunctionError, GrammarError};
pub use provider::{
    Builtin, DefaultProvider, FunctionProvider, Handler, MemoryStore, VariableStore,
};
pub use render::{render, Renderer};
