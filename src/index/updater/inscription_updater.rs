use super::*;

/// Phase (a): index every revealed inscription, then dispatch protocol
/// payloads to the genesis, mint, or MRC-20 handlers. Logical rejections
/// drop the operation and keep going; a duplicate inscription id is an
/// upstream contract violation and aborts the block.
pub(super) struct InscriptionUpdater<'a> {
  pub(super) block: &'a BlockEvent,
}

impl InscriptionUpdater<'_> {
  pub(super) fn index_inscriptions(&self, state: &mut store::State) -> Result {
    for inscription in &self.block.inscriptions {
      let key = keys::inscription(&inscription.id);
      if state.exists(&key)? {
        bail!("inscription {} already indexed", inscription.id);
      }

      store::put_json(state, &key, inscription)?;
      store::put_text(
        state,
        &keys::inscription_number(inscription.number),
        &inscription.id,
      )?;

      let Some(content) = inscription.content_byte.as_deref() else {
        continue;
      };

      match Payload::classify(content) {
        Payload::Genesis(protocol) => self.index_genesis(state, inscription, &protocol)?,
        Payload::Mint(mint) => self.index_carrier_mint(state, inscription, &mint)?,
        Payload::Mrc20(op) => self.index_mrc20(state, inscription, &op)?,
        Payload::Opaque => {}
      }
    }

    Ok(())
  }

  /// A full genesis payload either deploys a new collection or, when the
  /// collection already exists, is a mint attempt that must repeat the
  /// canonical protocol verbatim.
  fn index_genesis(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    protocol: &Mrc721Protocol,
  ) -> Result {
    let name = protocol.miner.upper_name();
    let tick = protocol.token.lower_tick();

    if let Some(record) = state.get_json::<GenesisRecord>(&keys::mrc721::genesis(&name))? {
      let canonical = state.canonical_protocol(&record)?;
      if *protocol != canonical {
        info!(
          "mint {} does not repeat the {name} genesis protocol, dropping",
          inscription.id
        );
        return Ok(());
      }
      return self.mint(state, inscription, record, &canonical);
    }

    if state.exists(&keys::mrc20::genesis(&tick))? {
      info!(
        "ticker {tick} already belongs to another collection, dropping deploy {}",
        inscription.id
      );
      return Ok(());
    }

    let record = GenesisRecord {
      id: inscription.id.clone(),
      number: inscription.number,
      name: name.clone(),
      display_name: protocol.miner.name.clone(),
      block_height: self.block.height,
      genesis_address: inscription.address.clone(),
      inscriptions_count: 1,
      inscriptions_max: protocol.miner.max().unwrap_or_default(),
      tick: tick.clone(),
      display_tick: protocol.token.tick.clone(),
      genesis_block_height: self.block.height,
      genesis_timestamp: self.block.timestamp,
      ..default()
    };

    store::put_json(state, &keys::mrc721::genesis(&name), &record)?;
    store::put_bytes(state, &keys::mrc20::genesis(&tick), name.as_bytes())?;

    info!(
      "collection {name} deployed by {} with tick {tick}",
      inscription.id
    );

    // The genesis inscription is itself mint sequence 0.
    self.record_membership(state, inscription, &name, 0)
  }

  /// HTML/SVG carriers mint by referencing `(collection name, genesis id)`
  /// instead of repeating the protocol.
  fn index_carrier_mint(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    mint: &mrc::CarrierMint,
  ) -> Result {
    let name = mint.name.to_uppercase();

    let Some(record) = state.get_json::<GenesisRecord>(&keys::mrc721::genesis(&name))?
    else {
      info!(
        "{} carrier {} references unknown collection {name}, dropping",
        mint.carrier, inscription.id
      );
      return Ok(());
    };

    if record.id != mint.genesis_id {
      info!(
        "{} carrier {} references genesis {} but {name} was deployed by {}, dropping",
        mint.carrier, inscription.id, mint.genesis_id, record.id
      );
      return Ok(());
    }

    let canonical = state.canonical_protocol(&record)?;
    self.mint(state, inscription, record, &canonical)
  }

  fn mint(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    mut record: GenesisRecord,
    canonical: &Mrc721Protocol,
  ) -> Result {
    let name = record.name.clone();

    let max = canonical
      .miner
      .max()
      .ok_or_else(|| anyhow!("stored genesis for {name} has an invalid max"))?;
    if record.inscriptions_count >= max {
      info!("collection {name} is fully minted, dropping {}", inscription.id);
      return Ok(());
    }

    let lim = canonical
      .miner
      .lim()
      .ok_or_else(|| anyhow!("stored genesis for {name} has an invalid lim"))?;
    let minted_by_address = state
      .get_u64(&keys::mrc721::address_count(&name, &inscription.address))?
      .unwrap_or(0);
    if minted_by_address >= lim {
      info!(
        "address {} reached the {name} per-address limit, dropping {}",
        inscription.address, inscription.id
      );
      return Ok(());
    }

    self.record_membership(state, inscription, &name, record.inscriptions_count)?;

    record.end_id = inscription.id.clone();
    record.end_block_height = Some(self.block.height);
    record.end_timestamp = self.block.timestamp;
    record.inscriptions_count += 1;
    store::put_json(state, &keys::mrc721::genesis(&name), &record)
  }

  fn record_membership(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    name: &str,
    sequence: u64,
  ) -> Result {
    store::put_bytes(state, &keys::mrc721::member(name, &inscription.id), &[])?;
    store::put_bytes(
      state,
      &keys::mrc721::holdings(&inscription.address, &inscription.id),
      &[],
    )?;
    store::put_bytes(
      state,
      &keys::mrc721::owner(&inscription.id, &inscription.address),
      &[],
    )?;
    store::put_text(state, &keys::mrc721::sequence(name, sequence), &inscription.id)?;
    store::put_text(
      state,
      &keys::mrc721::sequence_of(name, &inscription.id),
      &sequence.to_string(),
    )?;

    let count_key = keys::mrc721::address_count(name, &inscription.address);
    let count = state.get_u64(&count_key)?.unwrap_or(0);
    store::put_text(state, &count_key, &(count + 1).to_string())
  }

  fn index_mrc20(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    op: &Mrc20Op,
  ) -> Result {
    match op.operation() {
      Some(Mrc20Operation::Transfer) => self.index_mrc20_transfer(state, inscription, op),
      Some(Mrc20Operation::Burn) => self.index_mrc20_burn(state, inscription, op),
      None => Ok(()),
    }
  }

  /// Debit the inscriber and park the amount on the inscription; the
  /// credit lands when the inscription is later transferred out.
  fn index_mrc20_transfer(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    op: &Mrc20Op,
  ) -> Result {
    let Some(amount) = op.amount() else {
      return Ok(());
    };

    if !state.exists(&keys::mrc20::genesis(&op.tick))? {
      info!(
        "transfer {} references unknown tick {}, dropping",
        inscription.id, op.tick
      );
      return Ok(());
    }

    let balance_key = keys::mrc20::balance(&inscription.address, &op.tick);
    let Some(balance) = state.get_decimal(&balance_key)? else {
      info!(
        "address {} holds no {}, dropping transfer {}",
        inscription.address, op.tick, inscription.id
      );
      return Ok(());
    };
    if amount > balance {
      info!(
        "balance {balance} below transfer amount {amount}, dropping {}",
        inscription.id
      );
      return Ok(());
    }

    store::put_decimal(state, &balance_key, &(balance - &amount))?;
    store::put_bytes(
      state,
      &keys::mrc20::pending_by_tick(&op.tick, &inscription.id),
      &[],
    )?;
    store::put_bytes(
      state,
      &keys::mrc20::pending(&inscription.address, &inscription.id),
      &[],
    )?;
    store::put_bytes(
      state,
      &keys::mrc20::owner(&inscription.id, &inscription.address),
      &[],
    )?;

    Ok(())
  }

  fn index_mrc20_burn(
    &self,
    state: &mut store::State,
    inscription: &Inscription,
    op: &Mrc20Op,
  ) -> Result {
    let Some(target) = op.insc.as_deref() else {
      info!("burn {} names no target inscription, dropping", inscription.id);
      return Ok(());
    };
    let Some(amount) = op.amount() else {
      return Ok(());
    };

    let Some(name) = state.get_text(&keys::mrc20::genesis(&op.tick))? else {
      info!(
        "burn {} references unknown tick {}, dropping",
        inscription.id, op.tick
      );
      return Ok(());
    };

    let balance_key = keys::mrc20::balance(&inscription.address, &op.tick);
    let balance = state.get_decimal(&balance_key)?.unwrap_or_default();
    if amount > balance {
      info!(
        "balance {balance} below burn amount {amount}, dropping {}",
        inscription.id
      );
      return Ok(());
    }

    store::put_decimal(state, &balance_key, &(balance - &amount))?;

    let burn_key = keys::mrc721::burn(target);
    let burned = state.get_raw_biguint(&burn_key)? + &amount;
    store::put_raw_biguint(state, &burn_key, &burned)?;

    let genesis_key = keys::mrc721::genesis(&name);
    let mut record: GenesisRecord = state.get_json(&genesis_key)?
      .ok_or_else(|| anyhow!("tick {} maps to missing collection {name}", op.tick))?;
    record.total_burn += &amount;
    store::put_json(state, &genesis_key, &record)?;

    info!(
      "burn {} consumed {amount} {} toward {target}",
      inscription.id, op.tick
    );

    Ok(())
  }
}
