//! Text normalization layer for phrase fingerprinting.
//!
//! Turns free text into the character stream that the rolling hasher cuts
//! into k-grams. Downstream stages (perceptual, matcher) rely on this being
//! stable for a given [`NormalizeConfig`].
//!
//! ## What we do
//!
//! - Remove URL-shaped substrings (`http`, `https`, `ftp`) so links never
//!   contaminate k-grams
//! - Delete everything that is not an ASCII letter, digit or underscore
//!   (spaces optionally kept)
//! - ASCII-lowercase what remains
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence, no failure modes: every
//! input string normalizes to a (possibly empty) output string.

mod config;
mod error;
mod normalize;
mod token;

pub use crate::config::NormalizeConfig;
pub use crate::error::CanonicalError;
pub use crate::normalize::{count_occurrences, normalize};
pub use crate::token::is_single_token;
