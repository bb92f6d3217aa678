//! # Resonance Cipher
//!
//! Deterministic letter-to-number ciphers, collected in one registry keyed
//! by id.
//!
//! ## Contract
//!
//! Every cipher is a pure, total function `text -> number`:
//! - no input is rejected (empty strings, digits, punctuation, mixed case)
//! - characters outside `a..=z` contribute zero unless the cipher is defined
//!   over character positions or code points
//! - most ciphers return integers; the doubling and golden-ratio variants
//!   return reals
//!
//! ## Example
//!
//! ```rust
//! use resonance_cipher::{standard_registry, CipherValue};
//!
//! let registry = standard_registry();
//! assert_eq!(registry.evaluate("simple", "cat").unwrap(), CipherValue::Integer(24));
//!
//! for cipher in registry.select(&["english", "gemini-resonance"]).unwrap() {
//!     println!("{}: {}", cipher.label(), cipher.evaluate("cat"));
//! }
//! ```

mod ciphers;
mod error;
mod registry;
mod tables;
mod value;

pub use ciphers::{digit_sum_in_base, digital_root, ordinal};
pub use error::{CipherError, Result};
pub use registry::{standard_registry, Cipher, CipherRegistry, FnCipher, TableCipher};
pub use value::CipherValue;
