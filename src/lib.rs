//! Deterministic indexer for the MRC-721/MRC-20 inscription meta-protocol.
//!
//! Upstream hooks feed ordered [`BlockEvent`]s into [`Index::write_block`],
//! which applies the full protocol pipeline (inscription classification,
//! mint caps, MRC-20 ledger ops, per-block mining rewards, and
//! block-hash-seeded lottery draws) inside one atomic write transaction
//! per call. Committed state is served through the read accessors on
//! [`Index`].

use {
  anyhow::{anyhow, bail, Context, Error},
  clap::Parser,
  log::{info, warn},
  mrc::{hash_roll, Mrc20Op, Mrc20Operation, Mrc721Protocol, Payload},
  num_bigint::BigUint,
  num_traits::Zero,
  serde::{Deserialize, Serialize},
  std::{cmp::Reverse, collections::BTreeMap, fs, path::PathBuf, sync::Mutex},
};

pub use crate::{
  api::{
    AddressCollection, AddressInventory, BlockSummary, BurnInfo, Holder, InscriptionDetails,
    InscriptionRole, TokenBalance,
  },
  arguments::Arguments,
  event::{BlockEvent, Inscription, TransferEvent},
  index::{
    entry::{GenesisRecord, LotteryRound},
    Index, ReadError,
  },
  options::Options,
  subcommand::Subcommand,
};

pub mod api;
pub mod arguments;
pub mod event;
pub mod index;
pub mod options;
pub mod subcommand;
mod wire;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Destination address assigned to `burnt` transfers.
pub const BURN_ADDRESS: &str = "1BitcoinEaterAddressDontSendf59kuE";

/// Hash carried by synthesized gap-fill blocks.
pub const EMPTY_BLOCK_HASH: &str =
  "0x0000000000000000000000000000000000000000000000000000000000000000";

fn default<T: Default>() -> T {
  Default::default()
}
