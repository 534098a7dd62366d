//! Identifier generation
//!
//! This module produces the candidate identifiers probed against the
//! profile service:
//! - `Identifier`: one candidate string
//! - `IdentifierSpace`: every fixed-length string over an alphabet, in
//!   lexicographic order of the alphabet

mod generator;
mod identifier;

pub use generator::{IdentifierSpace, Identifiers, DEFAULT_ALPHABET, DEFAULT_LENGTH};
pub use identifier::Identifier;
