//! Types and parsers for the MRC-721/MRC-20 inscription meta-protocol.
//!
//! Everything in this crate is pure: payload classification, protocol
//! validation, permille arithmetic, and block-hash rolls. Resolving an
//! HTML/SVG carrier against an existing collection requires store access
//! and lives in the indexer crate.

use {
  num_bigint::BigUint,
  num_traits::Zero,
  serde::{Deserialize, Serialize},
  std::fmt::{self, Display, Formatter},
  thiserror::Error,
};

pub use {
  mrc20::{Mrc20Op, Mrc20Operation},
  mrc721::{BurnTerms, LotteryTerms, MinerTerms, Mrc721Protocol, TokenTerms},
  payload::{Carrier, CarrierMint, Payload},
  permille::Permille,
  roll::{hash_roll, RollError},
};

mod mrc20;
mod mrc721;
mod payload;
mod permille;
mod roll;

pub const MRC721_PROTOCOL: &str = "mrc-721";
pub const MRC20_PROTOCOL: &str = "mrc-20";

/// Hard upper bound shared by `miner.max`, `token.halv`, and `ltry.intvl`.
pub const PROTOCOL_FIELD_MAX: u64 = 100_000_000;

/// Why a payload failed protocol validation.
#[derive(Debug, PartialEq, Error)]
pub enum ProtocolError {
  #[error("amount is not a base-10 unsigned integer")]
  Amount,
  #[error("burn unit must be between 1 and token total")]
  BurnUnit,
  #[error("decimal field must be \"8\" when present")]
  Decimals,
  #[error("field value must be between 0 and 1000 permille")]
  PermilleRange,
  #[error("field value length must not exceed 5 characters")]
  PermilleLength,
  #[error("lottery interval must be between 1 and {PROTOCOL_FIELD_MAX}")]
  LotteryInterval,
  #[error("miner lim must be between 1 and max")]
  MinerLim,
  #[error("miner max must be between 1 and {PROTOCOL_FIELD_MAX}")]
  MinerMax,
  #[error("operation must be transfer or burn")]
  Operation,
  #[error("protocol tag mismatch")]
  ProtocolTag,
  #[error("ticker must be lowercase and at most 4 characters")]
  Tick,
  #[error("token beg must not exceed token total")]
  TokenBeg,
  #[error("token halv must be between 1 and {PROTOCOL_FIELD_MAX}")]
  TokenHalv,
  #[error("token total must be a base-10 integer of at most 100 digits")]
  TokenTotal,
}

/// Parse a decimal big integer, enforcing a maximum textual length.
pub(crate) fn parse_biguint(text: &str, max_len: usize) -> Option<BigUint> {
  if text.is_empty() || text.len() > max_len {
    return None;
  }
  BigUint::parse_bytes(text.as_bytes(), 10)
}

/// Parse a decimal integer bounded to `[1, PROTOCOL_FIELD_MAX]`.
pub(crate) fn parse_bounded(text: &str) -> Option<u64> {
  let value = text.parse::<u64>().ok()?;
  (1..=PROTOCOL_FIELD_MAX).contains(&value).then_some(value)
}
