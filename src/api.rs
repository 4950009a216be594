use super::*;

/// Compact block listing entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
  #[serde(rename = "block_height", with = "crate::wire::decimal_string")]
  pub height: u64,
  #[serde(rename = "block_hash")]
  pub hash: String,
  pub timestamp: i64,
}

/// Everything an address holds, by protocol family: owned MRC-721 member
/// inscriptions and unresolved MRC-20 pending transfers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressInventory {
  pub mrc721: Vec<String>,
  pub mrc20_pending: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
  pub tick: String,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub balance: BigUint,
}

/// An inscription with its computed protocol extensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InscriptionDetails {
  pub inscription: Inscription,
  /// Collection this inscription is a member of, if any.
  pub collection: Option<String>,
  pub tick: Option<String>,
  /// Mint sequence within the collection, zero-indexed.
  pub sequence: Option<u64>,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub mined: BigUint,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub power: BigUint,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub burned: BigUint,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holder {
  pub rank: u64,
  pub address: String,
  pub amount: u64,
  /// Share of the collection, formatted as `"12.34%"`.
  pub percentage: String,
}

/// Per-address rollup over one collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddressCollection {
  pub collection: String,
  pub tick: String,
  pub amount: u64,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub total_power: BigUint,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub total_reward: BigUint,
  /// First held member inscription encountered, and its reveal height.
  pub first_id: String,
  pub first_height: i64,
}

/// Burn standing of one mint inscription and the collection's burn terms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurnInfo {
  pub collection: String,
  pub tick: String,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub balance: BigUint,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub power: BigUint,
  #[serde(with = "crate::wire::decimal_biguint")]
  pub burned: BigUint,
  /// Total burn at which the power cap is reached; zero when the
  /// collection has no burn terms.
  #[serde(with = "crate::wire::decimal_biguint")]
  pub burn_to_cap: BigUint,
  pub unit: String,
  pub boost: String,
}

/// Protocol role of an inscription as committed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum InscriptionRole {
  Opaque,
  Mrc721 { collection: String, tick: String },
  Mrc20 { op: Mrc20Op },
}
