//! The store's key grammar: ASCII, `::`-separated. The grammar is part of
//! the persistence contract (archived stores must remain readable), so
//! every key is built here and nowhere else.

pub(crate) const LATEST_BLOCK: &str = "latestblock";

pub(crate) fn block(height: u64) -> String {
  format!("block::{height}")
}

pub(crate) fn block_hash(hash: &str) -> String {
  format!("bkhash::{hash}")
}

pub(crate) fn inscription(id: &str) -> String {
  format!("inscr::{id}")
}

pub(crate) fn inscription_number(number: i64) -> String {
  format!("inscr::number::{number}")
}

pub(crate) mod mrc721 {
  pub(crate) const GENESIS_PREFIX: &str = "mrc721::geninsc::";

  pub(crate) fn genesis(name: &str) -> String {
    format!("{GENESIS_PREFIX}{name}")
  }

  pub(crate) fn member(name: &str, id: &str) -> String {
    format!("mrc721::name_inscr::{name}::{id}")
  }

  pub(crate) fn member_prefix(name: &str) -> String {
    format!("mrc721::name_inscr::{name}::")
  }

  /// Sequence within the collection, zero-indexed; the genesis inscription
  /// is sequence 0.
  pub(crate) fn sequence(name: &str, sequence: u64) -> String {
    format!("mrc721::count_inscr::{name}::{sequence}")
  }

  pub(crate) fn sequence_of(name: &str, id: &str) -> String {
    format!("mrc721::inscr_count::{name}::{id}")
  }

  pub(crate) fn holdings(address: &str, id: &str) -> String {
    format!("mrc721::addr_inscr::{address}::{id}")
  }

  pub(crate) fn holdings_prefix(address: &str) -> String {
    format!("mrc721::addr_inscr::{address}::")
  }

  /// Reverse owner index; holds exactly one entry per inscription.
  pub(crate) fn owner(id: &str, address: &str) -> String {
    format!("mrc721::inscr_addr::{id}::{address}")
  }

  pub(crate) fn owner_prefix(id: &str) -> String {
    format!("mrc721::inscr_addr::{id}::")
  }

  pub(crate) fn address_count(name: &str, address: &str) -> String {
    format!("mrc721::addr_num::{name}::{address}")
  }

  pub(crate) fn mined(id: &str) -> String {
    format!("mrc721::inscr_miner::{id}")
  }

  pub(crate) fn power(id: &str) -> String {
    format!("mrc721::inscr_power::{id}")
  }

  pub(crate) fn burn(id: &str) -> String {
    format!("mrc721::burn::{id}")
  }
}

pub(crate) mod mrc20 {
  pub(crate) fn genesis(tick: &str) -> String {
    format!("mrc20::geninsc::{tick}")
  }

  pub(crate) fn balance(address: &str, tick: &str) -> String {
    format!("mrc20::balance::{address}::{tick}")
  }

  pub(crate) fn balance_prefix(address: &str) -> String {
    format!("mrc20::balance::{address}::")
  }

  pub(crate) fn pending_by_tick(tick: &str, id: &str) -> String {
    format!("mrc20::name_inscr::{tick}::{id}")
  }

  pub(crate) fn pending(address: &str, id: &str) -> String {
    format!("mrc20::addr_inscr::{address}::{id}")
  }

  pub(crate) fn pending_prefix(address: &str) -> String {
    format!("mrc20::addr_inscr::{address}::")
  }

  pub(crate) fn owner(id: &str, address: &str) -> String {
    format!("mrc20::inscr_addr::{id}::{address}")
  }

  pub(crate) fn owner_prefix(id: &str) -> String {
    format!("mrc20::inscr_addr::{id}::")
  }
}

pub(crate) mod lottery {
  pub(crate) fn round(name: &str, round: u64) -> String {
    format!("lottery::mrc721::{name}::{round}")
  }

  pub(crate) fn prefix(name: &str) -> String {
    format!("lottery::mrc721::{name}::")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn grammar_is_stable() {
    assert_eq!(block(42), "block::42");
    assert_eq!(block_hash("0xff"), "bkhash::0xff");
    assert_eq!(inscription("abci0"), "inscr::abci0");
    assert_eq!(inscription_number(-3), "inscr::number::-3");
    assert_eq!(mrc721::genesis("DEMO"), "mrc721::geninsc::DEMO");
    assert_eq!(mrc721::member("DEMO", "abci0"), "mrc721::name_inscr::DEMO::abci0");
    assert_eq!(mrc721::sequence("DEMO", 0), "mrc721::count_inscr::DEMO::0");
    assert_eq!(mrc721::sequence_of("DEMO", "abci0"), "mrc721::inscr_count::DEMO::abci0");
    assert_eq!(mrc721::holdings("addr", "abci0"), "mrc721::addr_inscr::addr::abci0");
    assert_eq!(mrc721::owner("abci0", "addr"), "mrc721::inscr_addr::abci0::addr");
    assert_eq!(mrc721::address_count("DEMO", "addr"), "mrc721::addr_num::DEMO::addr");
    assert_eq!(mrc721::mined("abci0"), "mrc721::inscr_miner::abci0");
    assert_eq!(mrc721::power("abci0"), "mrc721::inscr_power::abci0");
    assert_eq!(mrc721::burn("abci0"), "mrc721::burn::abci0");
    assert_eq!(mrc20::genesis("demo"), "mrc20::geninsc::demo");
    assert_eq!(mrc20::balance("addr", "demo"), "mrc20::balance::addr::demo");
    assert_eq!(mrc20::pending_by_tick("demo", "abci0"), "mrc20::name_inscr::demo::abci0");
    assert_eq!(mrc20::pending("addr", "abci0"), "mrc20::addr_inscr::addr::abci0");
    assert_eq!(mrc20::owner("abci0", "addr"), "mrc20::inscr_addr::abci0::addr");
    assert_eq!(lottery::round("DEMO", 3), "lottery::mrc721::DEMO::3");
  }

  #[test]
  fn owner_probe_is_separator_anchored() {
    // An id that is a prefix of another id must not match its keys.
    assert!(!mrc721::owner("abci01", "addr").starts_with(&mrc721::owner_prefix("abci0")));
  }
}
