//! Serde adapters for the store's historical JSON encodings. Archived
//! stores carry heights as decimal strings, token quantities as base-10
//! text, and inscription content as base64; these adapters keep the JSON
//! byte-compatible.

pub(crate) mod decimal_string {
  use serde::{de, Deserialize, Deserializer, Serializer};

  pub(crate) fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    String::deserialize(deserializer)?
      .parse()
      .map_err(de::Error::custom)
  }
}

/// Like [`decimal_string`], but an unset height is the empty string.
pub(crate) mod optional_decimal_string {
  use serde::{de, Deserialize, Deserializer, Serializer};

  pub(crate) fn serialize<S: Serializer>(
    value: &Option<u64>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match value {
      Some(value) => serializer.collect_str(value),
      None => serializer.serialize_str(""),
    }
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<u64>, D::Error> {
    let text = String::deserialize(deserializer)?;
    if text.is_empty() {
      return Ok(None);
    }
    text.parse().map(Some).map_err(de::Error::custom)
  }
}

pub(crate) mod decimal_biguint {
  use {
    num_bigint::BigUint,
    serde::{de, Deserialize, Deserializer, Serializer},
  };

  pub(crate) fn serialize<S: Serializer>(
    value: &BigUint,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_str_radix(10))
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<BigUint, D::Error> {
    let text = String::deserialize(deserializer)?;
    BigUint::parse_bytes(text.as_bytes(), 10)
      .ok_or_else(|| de::Error::custom(format!("invalid base-10 integer: {text}")))
  }
}

pub(crate) mod content_bytes {
  use {
    base64::{engine::general_purpose::STANDARD, Engine},
    serde::{de, Deserialize, Deserializer, Serializer},
  };

  pub(crate) fn serialize<S: Serializer>(
    bytes: &Option<Vec<u8>>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    match bytes {
      Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
      None => serializer.serialize_none(),
    }
  }

  pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<Vec<u8>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
      .map(|text| STANDARD.decode(text).map_err(de::Error::custom))
      .transpose()
  }
}
