use {
  super::*,
  redb::{ReadOnlyTable, ReadableTable, Table, TableDefinition},
  serde::de::DeserializeOwned,
};

/// The single ordered table holding the entire key grammar.
pub(crate) const STATE: TableDefinition<&str, &[u8]> = TableDefinition::new("state");

pub(crate) type State<'txn> = Table<'txn, &'static str, &'static [u8]>;
pub(crate) type StateSnapshot = ReadOnlyTable<&'static str, &'static [u8]>;

/// Read helpers over the state table, shared by the write path (on the
/// open write transaction's table) and the read accessors (on committed
/// snapshots).
pub(crate) trait StateRead: ReadableTable<&'static str, &'static [u8]> {
  fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
    Ok(self.get(key)?.map(|guard| guard.value().to_vec()))
  }

  fn get_text(&self, key: &str) -> Result<Option<String>> {
    self
      .get_bytes(key)?
      .map(|bytes| String::from_utf8(bytes).map_err(|_| anyhow!("non-utf8 value under `{key}`")))
      .transpose()
  }

  fn get_u64(&self, key: &str) -> Result<Option<u64>> {
    self
      .get_text(key)?
      .map(|text| {
        text
          .parse()
          .map_err(|_| anyhow!("malformed counter under `{key}`: {text}"))
      })
      .transpose()
  }

  fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    match self.get(key)? {
      Some(guard) => Ok(Some(
        serde_json::from_slice(guard.value())
          .with_context(|| format!("malformed record under `{key}`"))?,
      )),
      None => Ok(None),
    }
  }

  /// Decimal big-integer values (balances and related counters).
  fn get_decimal(&self, key: &str) -> Result<Option<BigUint>> {
    match self.get(key)? {
      Some(guard) => Ok(Some(
        BigUint::parse_bytes(guard.value(), 10)
          .ok_or_else(|| anyhow!("malformed balance under `{key}`"))?,
      )),
      None => Ok(None),
    }
  }

  /// Raw minimal big-endian big-integer values (mined, power, burn). An
  /// absent key decodes as zero, matching the historical encoding where
  /// zero is the empty byte string.
  fn get_raw_biguint(&self, key: &str) -> Result<BigUint> {
    Ok(
      self
        .get(key)?
        .map(|guard| BigUint::from_bytes_be(guard.value()))
        .unwrap_or_default(),
    )
  }

  fn exists(&self, key: &str) -> Result<bool> {
    Ok(self.get(key)?.is_some())
  }

  fn exists_prefix(&self, prefix: &str) -> Result<bool> {
    Ok(self.first_suffix(prefix)?.is_some())
  }

  /// The suffix of the first key under `prefix`, if any. Owner indexes
  /// hold exactly one entry, so this is also the unique-owner lookup.
  fn first_suffix(&self, prefix: &str) -> Result<Option<String>> {
    for entry in self.range(prefix..)? {
      let (key, _) = entry?;
      let key = key.value();
      return Ok(
        key
          .starts_with(prefix)
          .then(|| key[prefix.len()..].to_string()),
      );
    }
    Ok(None)
  }

  /// Suffixes of every key under `prefix`, in the table's lexicographic
  /// order. Iteration order is part of the determinism contract.
  fn prefix_suffixes(&self, prefix: &str) -> Result<Vec<String>> {
    let mut suffixes = Vec::new();
    for entry in self.range(prefix..)? {
      let (key, _) = entry?;
      let key = key.value();
      if !key.starts_with(prefix) {
        break;
      }
      suffixes.push(key[prefix.len()..].to_string());
    }
    Ok(suffixes)
  }

  /// `(suffix, value)` pairs under `prefix`, in lexicographic key order.
  fn prefix_entries(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>> {
    let mut entries = Vec::new();
    for entry in self.range(prefix..)? {
      let (key, value) = entry?;
      let key = key.value();
      if !key.starts_with(prefix) {
        break;
      }
      entries.push((key[prefix.len()..].to_string(), value.value().to_vec()));
    }
    Ok(entries)
  }

  /// Re-parse a collection's canonical protocol from the content of its
  /// genesis inscription. The stored genesis must parse; failure is an
  /// invariant breach, not a protocol drop.
  fn canonical_protocol(&self, record: &entry::GenesisRecord) -> Result<Mrc721Protocol> {
    let inscription: Inscription = self
      .get_json(&keys::inscription(&record.id))?
      .ok_or_else(|| anyhow!("genesis inscription {} missing for {}", record.id, record.name))?;

    let content = inscription
      .content_byte
      .as_deref()
      .ok_or_else(|| anyhow!("genesis inscription {} has no content", record.id))?;

    Mrc721Protocol::from_json(content)
      .ok_or_else(|| anyhow!("genesis inscription {} does not parse", record.id))
  }
}

impl<T: ReadableTable<&'static str, &'static [u8]>> StateRead for T {}

pub(crate) fn put_bytes(table: &mut State, key: &str, value: &[u8]) -> Result {
  table.insert(key, value)?;
  Ok(())
}

pub(crate) fn put_text(table: &mut State, key: &str, value: &str) -> Result {
  put_bytes(table, key, value.as_bytes())
}

pub(crate) fn put_json<T: Serialize>(table: &mut State, key: &str, value: &T) -> Result {
  let json = serde_json::to_vec(value)?;
  put_bytes(table, key, &json)
}

pub(crate) fn put_decimal(table: &mut State, key: &str, value: &BigUint) -> Result {
  put_text(table, key, &value.to_str_radix(10))
}

pub(crate) fn put_raw_biguint(table: &mut State, key: &str, value: &BigUint) -> Result {
  put_bytes(table, key, &entry::raw_bytes(value))
}

pub(crate) fn delete(table: &mut State, key: &str) -> Result {
  table.remove(key)?;
  Ok(())
}
