use super::*;

/// Raw minimal big-endian encoding for the `mrc721::*` big-integer family.
/// Zero is the empty byte string; both directions must stay byte-for-byte
/// compatible with archived stores.
pub(crate) fn raw_bytes(value: &BigUint) -> Vec<u8> {
  if value.is_zero() {
    Vec::new()
  } else {
    value.to_bytes_be()
  }
}

/// Per-collection root record, mutated by mints, mining, lottery draws,
/// and burns. Serialized field names and encodings match the archived
/// store: heights are decimal strings, token quantities base-10 text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisRecord {
  /// Id of the genesis inscription.
  pub id: String,
  pub number: i64,
  /// Collection name, uppercased for indexing.
  pub name: String,
  #[serde(rename = "previous_name")]
  pub display_name: String,
  #[serde(with = "crate::wire::decimal_string")]
  pub block_height: u64,
  pub genesis_address: String,
  pub inscriptions_count: u64,
  pub inscriptions_max: u64,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub prize_pool_tokens: BigUint,
  #[serde(rename = "mined_tokens", with = "crate::wire::decimal_biguint")]
  pub total_mined_tokens: BigUint,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub total_prize_pool_tokens: BigUint,
  /// Token ticker, lowercased for indexing.
  pub tick: String,
  #[serde(rename = "previous_tick")]
  pub display_tick: String,
  #[serde(with = "crate::wire::decimal_string")]
  pub genesis_block_height: u64,
  pub genesis_timestamp: i64,
  /// Most recently minted inscription; unset until the first mint after
  /// genesis.
  pub end_id: String,
  #[serde(with = "crate::wire::optional_decimal_string")]
  pub end_block_height: Option<u64>,
  pub end_timestamp: i64,
  pub total_prize_round: u64,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub total_burn: BigUint,
}

/// Immutable record of one lottery payout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryRound {
  #[serde(rename = "block_height", with = "crate::wire::decimal_string")]
  pub height: u64,
  #[serde(rename = "block_hash")]
  pub hash: String,
  pub timestamp: i64,
  /// Winner address at draw time.
  pub address: String,
  pub inscription_id: String,
  /// Number of the winning inscription.
  pub number: i64,
  #[serde(rename = "mrc721name")]
  pub collection: String,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub win_amount: BigUint,
  /// Pool accumulation before the payout.
  #[serde(with = "crate::wire::decimal_biguint")]
  pub jackpot_accum: BigUint,
  pub round: u64,
  /// Win-probability and distribution parameters at draw time, as declared
  /// in the protocol text.
  pub winp: String,
  pub dist: String,
}
