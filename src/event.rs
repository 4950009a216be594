use super::*;

/// One block as delivered by the upstream hook: ordered inscription
/// reveals followed by ordered transfers of inscription-bearing satoshis.
///
/// Stored block records keep the encoder's historical capitalized list
/// keys; the decoder also accepts the lowercase ingest names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockEvent {
  #[serde(rename = "block_height", with = "wire::decimal_string")]
  pub height: u64,
  #[serde(rename = "block_hash")]
  pub hash: String,
  pub timestamp: i64,
  #[serde(rename = "Inscriptions", alias = "inscriptions", default)]
  pub inscriptions: Vec<Inscription>,
  #[serde(rename = "Transfers", alias = "transfers", default)]
  pub transfers: Vec<TransferEvent>,
  // Accepted from upstream but unimplemented; reorgs are handled by
  // refusing duplicate heights only.
  #[serde(default, skip_serializing)]
  pub rollback: Vec<serde_json::Value>,
}

impl BlockEvent {
  /// A synthesized gap-fill block: sentinel hash, no events.
  pub fn empty(height: u64) -> Self {
    Self {
      height,
      hash: EMPTY_BLOCK_HASH.into(),
      ..default()
    }
  }

  pub fn is_gap_fill(&self) -> bool {
    self.hash == EMPTY_BLOCK_HASH
  }
}

/// A revealed inscription. Once indexed, only `address` mutates; `number`
/// and content are immutable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inscription {
  pub id: String,
  #[serde(deserialize_with = "number::deserialize")]
  pub number: i64,
  pub address: String,
  pub offset: String,
  pub sat: i64,
  pub block_height: i64,
  pub ordinal_height: i64,
  #[serde(with = "wire::content_bytes", default)]
  pub content_byte: Option<Vec<u8>>,
  pub content_type: String,
  pub content_length: i64,
  pub curse_type: Option<String>,
  pub inscription_fee: i64,
  pub inscription_input_index: i64,
  pub inscription_output_value: i64,
  pub satpoint_post_inscription: String,
  pub transfers_pre_inscription: i64,
  pub tx_index: i64,
}

/// Some upstream encoders send the inscription number as a bare integer,
/// others as `{classic, jubilee}`. The classic number is what the index
/// stores; a missing jubilee defaults to -1.
mod number {
  use serde::{Deserialize, Deserializer};

  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Number {
    Classic(i64),
    Split {
      classic: i64,
      #[serde(default = "missing")]
      #[allow(dead_code)]
      jubilee: i64,
    },
  }

  fn missing() -> i64 {
    -1
  }

  pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Number::deserialize(deserializer)? {
      Number::Classic(number) | Number::Split {
        classic: number, ..
      } => number,
    })
  }
}

/// An inscription-bearing satoshi moving between addresses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferEvent {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub to_address: String,
  pub post_transfer_output_value: i64,
  pub satpoint_post_transfer: String,
  pub satpoint_pre_transfer: String,
  pub tx_index: i64,
}

impl TransferEvent {
  /// The effective destination address, or `None` for unknown transfer
  /// kinds, which are dropped.
  pub fn destination(&self) -> Option<&str> {
    match self.kind.as_str() {
      "transferred" => Some(&self.to_address),
      "burnt" => Some(BURN_ADDRESS),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn block_event_accepts_both_list_key_spellings() {
    let lowercase: BlockEvent = serde_json::from_str(
      r#"{"block_height": "7", "block_hash": "0xff", "timestamp": 1, "inscriptions": [], "transfers": []}"#,
    )
    .unwrap();
    let capitalized: BlockEvent = serde_json::from_str(
      r#"{"block_height": "7", "block_hash": "0xff", "timestamp": 1, "Inscriptions": [], "Transfers": []}"#,
    )
    .unwrap();
    assert_eq!(lowercase, capitalized);
    assert_eq!(lowercase.height, 7);
  }

  #[test]
  fn rollback_is_accepted_and_ignored() {
    let event: BlockEvent = serde_json::from_str(
      r#"{"block_height": "7", "block_hash": "0xff", "timestamp": 1, "rollback": [{"block_height": "6"}]}"#,
    )
    .unwrap();
    assert_eq!(event.rollback.len(), 1);
    assert!(!serde_json::to_string(&event).unwrap().contains("rollback"));
  }

  #[test]
  fn number_decodes_from_integer_and_object() {
    let bare: Inscription =
      serde_json::from_str(r#"{"id": "a", "number": 42, "address": "x"}"#).unwrap();
    assert_eq!(bare.number, 42);

    let split: Inscription =
      serde_json::from_str(r#"{"id": "a", "number": {"classic": 42}, "address": "x"}"#).unwrap();
    assert_eq!(split.number, 42);
  }

  #[test]
  fn content_bytes_round_trip_as_base64() {
    let inscription = Inscription {
      id: "a".into(),
      content_byte: Some(b"hello".to_vec()),
      ..default()
    };
    let json = serde_json::to_string(&inscription).unwrap();
    assert!(json.contains("aGVsbG8="));
    let decoded: Inscription = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.content_byte.as_deref(), Some(b"hello".as_slice()));
  }

  #[test]
  fn burnt_transfers_resolve_to_the_burn_address() {
    let transfer = TransferEvent {
      kind: "burnt".into(),
      to_address: "ignored".into(),
      ..default()
    };
    assert_eq!(transfer.destination(), Some(BURN_ADDRESS));

    let unknown = TransferEvent {
      kind: "teleported".into(),
      ..default()
    };
    assert_eq!(unknown.destination(), None);
  }
}
