//! # vidchain-shared
//!
//! Data model shared by every VidChain crate: the caller-facing types
//! ([`types`]), the shapes the backend canister speaks ([`wire`]), the
//! closed backend error set ([`error`]) and the conversions between the two
//! worlds ([`convert`]).

pub mod constants;
pub mod convert;
pub mod error;
pub mod types;
pub mod wire;

pub use convert::{encode_category, normalize_video};
pub use error::VidChainError;
pub use types::*;

// Ledger-native scalar types, re-exported so callers need not depend on candid.
pub use candid::{Int, Nat, Principal};
