//! Utility functions for rule implementations.

pub mod allowance;
pub mod value;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{parse_allow_directive, AllowDirective, Allowances};
#[doc(inline)]
pub use value::{tokenize, Token, TokenKind};
