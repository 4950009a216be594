use super::*;

/// Collection name an inscription's payload points at, if it carries an
/// MRC-721 payload at all. Membership still has to be confirmed against
/// the collection indexes; a dropped mint keeps its payload but never
/// joined.
fn payload_collection(inscription: &Inscription) -> Option<String> {
  match Payload::classify(inscription.content_byte.as_deref()?) {
    Payload::Genesis(protocol) => Some(protocol.miner.upper_name()),
    Payload::Mint(mint) => Some(mint.name.to_uppercase()),
    _ => None,
  }
}

fn paginate<T>(items: Vec<T>, page_index: usize, page_size: usize) -> Vec<T> {
  let start = page_index.saturating_mul(page_size).min(items.len());
  items
    .into_iter()
    .skip(start)
    .take(page_size)
    .collect()
}

impl Index {
  pub fn latest_height(&self) -> Result<Option<u64>> {
    let state = self.snapshot()?;
    state.get_u64(keys::LATEST_BLOCK)
  }

  pub fn block(&self, height: u64) -> Result<BlockEvent> {
    let state = self.snapshot()?;
    state.get_json(&keys::block(height))?
      .ok_or_else(|| ReadError::NotFound(format!("block {height}")).into())
  }

  pub fn block_by_hash(&self, hash: &str) -> Result<BlockEvent> {
    let state = self.snapshot()?;
    let height = state.get_u64(&keys::block_hash(hash))?
      .ok_or_else(|| ReadError::NotFound(format!("block {hash}")))?;
    state.get_json(&keys::block(height))?
      .ok_or_else(|| anyhow!("hash index points at missing block {height}"))
  }

  /// Summaries for `[start, end]`, inclusive; unindexed heights are
  /// skipped.
  pub fn blocks(&self, start: u64, end: u64) -> Result<Vec<BlockSummary>> {
    if end < start {
      return Err(ReadError::InvalidArgument(format!("range {start}..={end} is inverted")).into());
    }

    let state = self.snapshot()?;
    let mut summaries = Vec::new();
    for height in start..=end {
      let Some(block) = state.get_json::<BlockEvent>(&keys::block(height))? else {
        continue;
      };
      summaries.push(BlockSummary {
        height: block.height,
        hash: block.hash,
        timestamp: block.timestamp,
      });
    }
    Ok(summaries)
  }

  /// Heights in `[begin, end]` that were never applied or are gap-fill
  /// placeholders.
  pub fn scan_missing_blocks(&self, begin: u64, end: u64) -> Result<Vec<u64>> {
    if end <= begin {
      return Err(ReadError::InvalidArgument("end must be greater than begin".into()).into());
    }

    let state = self.snapshot()?;
    let mut missing = Vec::new();
    for height in begin..=end {
      match state.get_json::<BlockEvent>(&keys::block(height))? {
        Some(block) if !block.is_gap_fill() => {}
        _ => missing.push(height),
      }
    }
    Ok(missing)
  }

  pub fn address_inventory(&self, address: &str) -> Result<AddressInventory> {
    let state = self.snapshot()?;
    Ok(AddressInventory {
      mrc721: state.prefix_suffixes(&keys::mrc721::holdings_prefix(address))?,
      mrc20_pending: state.prefix_suffixes(&keys::mrc20::pending_prefix(address))?,
    })
  }

  /// Balance rows are never deleted, so an absent row is a zero balance,
  /// not an error.
  pub fn balance(&self, address: &str, tick: &str) -> Result<BigUint> {
    let state = self.snapshot()?;
    Ok(state.get_decimal(&keys::mrc20::balance(address, tick))?.unwrap_or_default())
  }

  pub fn balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
    let state = self.snapshot()?;
    let mut balances = Vec::new();
    for (tick, value) in state.prefix_entries(&keys::mrc20::balance_prefix(address))? {
      let balance = BigUint::parse_bytes(&value, 10)
        .ok_or_else(|| anyhow!("malformed balance for {address}::{tick}"))?;
      balances.push(TokenBalance { tick, balance });
    }
    Ok(balances)
  }

  pub fn inscription(&self, id: &str) -> Result<Inscription> {
    let state = self.snapshot()?;
    state.get_json(&keys::inscription(id))?
      .ok_or_else(|| ReadError::NotFound(format!("inscription {id}")).into())
  }

  pub fn inscription_by_number(&self, number: i64) -> Result<Inscription> {
    let state = self.snapshot()?;
    let id = state.get_text(&keys::inscription_number(number))?
      .ok_or_else(|| ReadError::NotFound(format!("inscription number {number}")))?;
    state.get_json(&keys::inscription(&id))?
      .ok_or_else(|| anyhow!("number index points at missing inscription {id}"))
  }

  pub fn inscription_details(&self, id: &str) -> Result<InscriptionDetails> {
    let state = self.snapshot()?;
    let inscription: Inscription = state.get_json(&keys::inscription(id))?
      .ok_or_else(|| ReadError::NotFound(format!("inscription {id}")))?;

    let mut collection = None;
    let mut tick = None;
    let mut sequence = None;
    if let Some(name) = payload_collection(&inscription) {
      sequence = state.get_u64(&keys::mrc721::sequence_of(&name, id))?;
      if sequence.is_some() {
        tick = state.get_json::<GenesisRecord>(&keys::mrc721::genesis(&name))?
          .map(|record| record.tick);
        collection = Some(name);
      }
    }

    Ok(InscriptionDetails {
      mined: state.get_raw_biguint(&keys::mrc721::mined(id))?,
      power: state.get_raw_biguint(&keys::mrc721::power(id))?,
      burned: state.get_raw_biguint(&keys::mrc721::burn(id))?,
      inscription,
      collection,
      tick,
      sequence,
    })
  }

  pub fn genesis_record(&self, name: &str) -> Result<GenesisRecord> {
    let state = self.snapshot()?;
    let name = name.to_uppercase();
    state.get_json(&keys::mrc721::genesis(&name))?
      .ok_or_else(|| ReadError::NotFound(format!("collection {name}")).into())
  }

  pub fn collections(&self) -> Result<Vec<GenesisRecord>> {
    let state = self.snapshot()?;
    let mut collections = Vec::new();
    for (name, value) in state.prefix_entries(keys::mrc721::GENESIS_PREFIX)? {
      collections.push(
        serde_json::from_slice(&value)
          .with_context(|| format!("malformed genesis record for {name}"))?,
      );
    }
    Ok(collections)
  }

  /// Member inscription ids, paginated, with the unpaginated total.
  pub fn collection_members(
    &self,
    name: &str,
    page_index: usize,
    page_size: usize,
  ) -> Result<(Vec<String>, usize)> {
    let state = self.snapshot()?;
    let members =
      state.prefix_suffixes(&keys::mrc721::member_prefix(&name.to_uppercase()))?;
    let total = members.len();
    Ok((paginate(members, page_index, page_size), total))
  }

  /// Holders ranked by member count, ties broken by address. Percentage is
  /// each holder's share of all members.
  pub fn holders(
    &self,
    name: &str,
    page_index: usize,
    page_size: usize,
  ) -> Result<(Vec<Holder>, usize)> {
    let state = self.snapshot()?;
    let name = name.to_uppercase();

    let mut counts = BTreeMap::<String, u64>::new();
    let mut total_members = 0u64;
    for id in state.prefix_suffixes(&keys::mrc721::member_prefix(&name))? {
      let Some(address) = state.first_suffix(&keys::mrc721::owner_prefix(&id))? else {
        continue;
      };
      *counts.entry(address).or_default() += 1;
      total_members += 1;
    }

    let mut holders: Vec<(String, u64)> = counts.into_iter().collect();
    holders.sort_by_key(|(_, amount)| Reverse(*amount));

    let holders = holders
      .into_iter()
      .enumerate()
      .map(|(position, (address, amount))| Holder {
        rank: position as u64 + 1,
        address,
        amount,
        percentage: format!(
          "{:.2}%",
          amount as f64 / total_members.max(1) as f64 * 100.0
        ),
      })
      .collect::<Vec<Holder>>();

    let total = holders.len();
    Ok((paginate(holders, page_index, page_size), total))
  }

  pub fn lottery_history(&self, name: &str) -> Result<Vec<LotteryRound>> {
    let state = self.snapshot()?;
    let name = name.to_uppercase();
    let mut rounds = Vec::new();
    for (round, value) in state.prefix_entries(&keys::lottery::prefix(&name))? {
      rounds.push(
        serde_json::from_slice::<LotteryRound>(&value)
          .with_context(|| format!("malformed lottery round {round} for {name}"))?,
      );
    }
    rounds.sort_by_key(|round| round.round);
    Ok(rounds)
  }

  /// Per-collection rollup of everything `address` holds: member count,
  /// accumulated power and rewards, and the first held member. Newest
  /// collections first.
  pub fn address_collections(&self, address: &str) -> Result<Vec<AddressCollection>> {
    let state = self.snapshot()?;

    let mut rollups = BTreeMap::<String, AddressCollection>::new();
    for id in state.prefix_suffixes(&keys::mrc721::holdings_prefix(address))? {
      let Some(inscription) =
        state.get_json::<Inscription>(&keys::inscription(&id))?
      else {
        continue;
      };
      let Some(name) = payload_collection(&inscription) else {
        continue;
      };

      let rollup = rollups.entry(name.clone()).or_insert_with(|| AddressCollection {
        collection: name,
        tick: String::new(),
        amount: 0,
        total_power: BigUint::default(),
        total_reward: BigUint::default(),
        first_id: id.clone(),
        first_height: inscription.block_height,
      });

      rollup.amount += 1;
      rollup.total_power += state.get_raw_biguint(&keys::mrc721::power(&id))?;
      rollup.total_reward += state.get_raw_biguint(&keys::mrc721::mined(&id))?;
    }

    let mut collections = Vec::new();
    for (name, mut rollup) in rollups {
      rollup.tick = state.get_json::<GenesisRecord>(&keys::mrc721::genesis(&name))?
        .map(|record| record.tick)
        .unwrap_or_default();
      collections.push(rollup);
    }
    collections.sort_by_key(|rollup| Reverse(rollup.first_height));

    Ok(collections)
  }

  pub fn collection_exists(&self, name: &str) -> Result<bool> {
    let state = self.snapshot()?;
    state.exists(&keys::mrc721::genesis(&name.to_uppercase()))
  }

  pub fn tick_exists(&self, tick: &str) -> Result<bool> {
    let state = self.snapshot()?;
    state.exists(&keys::mrc20::genesis(&tick.to_lowercase()))
  }

  /// The canonical protocol of a collection, re-parsed from its genesis
  /// inscription.
  pub fn genesis_protocol(&self, name: &str) -> Result<Mrc721Protocol> {
    let state = self.snapshot()?;
    let record: GenesisRecord =
      state.get_json(&keys::mrc721::genesis(&name.to_uppercase()))?
        .ok_or_else(|| ReadError::NotFound(format!("collection {name}")))?;
    state.canonical_protocol(&record)
  }

  pub fn burn_info(&self, id: &str) -> Result<BurnInfo> {
    let state = self.snapshot()?;
    let inscription: Inscription = state.get_json(&keys::inscription(id))?
      .ok_or_else(|| ReadError::NotFound(format!("inscription {id}")))?;

    let name = payload_collection(&inscription).ok_or_else(|| {
      ReadError::InvalidArgument(format!("inscription {id} carries no MRC-721 payload"))
    })?;
    let record: GenesisRecord = state.get_json(&keys::mrc721::genesis(&name))?
      .ok_or_else(|| ReadError::NotFound(format!("collection {name}")))?;
    let canonical = state.canonical_protocol(&record)?;

    let (unit, boost, burn_to_cap) = match &canonical.burn {
      Some(terms) => {
        let boost = terms.boost().value();
        let burn_to_cap = match (terms.unit(), boost) {
          (Some(unit), boost) if boost > 0 => unit * 10_000u32 / boost,
          _ => BigUint::default(),
        };
        (terms.unit.clone(), terms.boost.clone(), burn_to_cap)
      }
      None => ("0".into(), "0".into(), BigUint::default()),
    };

    Ok(BurnInfo {
      balance: state
        .get_decimal(&keys::mrc20::balance(&inscription.address, &record.tick))?
        .unwrap_or_default(),
      power: state.get_raw_biguint(&keys::mrc721::power(id))?,
      burned: state.get_raw_biguint(&keys::mrc721::burn(id))?,
      collection: name,
      tick: record.tick,
      burn_to_cap,
      unit,
      boost,
    })
  }

  /// Committed protocol role of an inscription. A payload that was dropped
  /// (cap exceeded, protocol mismatch) reads as opaque.
  pub fn classify_inscription(&self, id: &str) -> Result<InscriptionRole> {
    let state = self.snapshot()?;
    let inscription: Inscription = state.get_json(&keys::inscription(id))?
      .ok_or_else(|| ReadError::NotFound(format!("inscription {id}")))?;

    let Some(content) = inscription.content_byte.as_deref() else {
      return Ok(InscriptionRole::Opaque);
    };

    Ok(match Payload::classify(content) {
      Payload::Genesis(_) | Payload::Mint(_) => {
        let name = payload_collection(&inscription).expect("classified as MRC-721");
        match state.get_u64(&keys::mrc721::sequence_of(&name, id))? {
          Some(_) => {
            let record: GenesisRecord = state.get_json(&keys::mrc721::genesis(&name))?
              .ok_or_else(|| anyhow!("member of missing collection {name}"))?;
            InscriptionRole::Mrc721 {
              collection: name,
              tick: record.tick,
            }
          }
          None => InscriptionRole::Opaque,
        }
      }
      Payload::Mrc20(op) => InscriptionRole::Mrc20 { op },
      Payload::Opaque => InscriptionRole::Opaque,
    })
  }
}
