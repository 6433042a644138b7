//! Shared foundational types for the ECO evaluator.
//!
//! Provides interned cell names and the result type used for internal
//! (non-user) failures.

#![warn(missing_docs)]

pub mod ident;
pub mod result;

pub use ident::{Ident, Interner};
pub use result::{EcoResult, InternalError};
