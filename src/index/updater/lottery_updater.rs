use super::*;

/// Phase (d): block-hash-seeded prize draws. Runs after mining so the
/// block's pool skim is already in the pot. Gap-fill blocks carry the
/// zero-hash sentinel and never draw.
pub(super) struct LotteryUpdater<'a> {
  pub(super) block: &'a BlockEvent,
}

impl LotteryUpdater<'_> {
  pub(super) fn draw(&self, state: &mut store::State) -> Result {
    if self.block.is_gap_fill() {
      return Ok(());
    }

    for name in state.prefix_suffixes(keys::mrc721::GENESIS_PREFIX)? {
      self.draw_collection(state, &name)?;
    }
    Ok(())
  }

  fn draw_collection(&self, state: &mut store::State, name: &str) -> Result {
    let genesis_key = keys::mrc721::genesis(name);
    let mut record: GenesisRecord = state.get_json(&genesis_key)?
      .ok_or_else(|| anyhow!("collection {name} disappeared mid-block"))?;

    if record.prize_pool_tokens.is_zero() {
      return Ok(());
    }

    let canonical = state.canonical_protocol(&record)?;
    let Some(ltry) = &canonical.ltry else {
      return Ok(());
    };
    let intvl = ltry
      .intvl()
      .ok_or_else(|| anyhow!("stored genesis for {name} has an invalid lottery interval"))?;

    let blocks = self.block.height - record.genesis_block_height;
    if blocks == 0 || blocks % intvl != 0 {
      return Ok(());
    }

    let roll = hash_roll(&self.block.hash, 1000)?;
    if roll > ltry.winp().value() {
      return Ok(());
    }

    let sequence = hash_roll(&self.block.hash, record.inscriptions_count)?;
    let id = state.get_text(&keys::mrc721::sequence(name, sequence))?
      .ok_or_else(|| anyhow!("collection {name} has no inscription at sequence {sequence}"))?;
    let winner = state.first_suffix(&keys::mrc721::owner_prefix(&id))?
      .ok_or_else(|| anyhow!("winning inscription {id} has no owner"))?;
    let inscription: Inscription = state.get_json(&keys::inscription(&id))?
      .ok_or_else(|| anyhow!("winning inscription {id} missing"))?;

    let amount = ltry.dist().of(&record.prize_pool_tokens);

    let balance_key = keys::mrc20::balance(&winner, &record.tick);
    let balance = state.get_decimal(&balance_key)?.unwrap_or_default();
    store::put_decimal(state, &balance_key, &(balance + &amount))?;

    let jackpot_accum = record.prize_pool_tokens.clone();
    record.prize_pool_tokens -= &amount;
    record.total_prize_round += 1;
    store::put_json(state, &genesis_key, &record)?;

    let round = LotteryRound {
      height: self.block.height,
      hash: self.block.hash.clone(),
      timestamp: self.block.timestamp,
      address: winner.clone(),
      inscription_id: id.clone(),
      number: inscription.number,
      collection: name.to_string(),
      win_amount: amount.clone(),
      jackpot_accum,
      round: record.total_prize_round,
      winp: ltry.winp.clone(),
      dist: ltry.dist.clone(),
    };
    store::put_json(
      state,
      &keys::lottery::round(name, record.total_prize_round),
      &round,
    )?;

    info!(
      "lottery round {} for {name}: {winner} wins {amount} {} on inscription {id}",
      record.total_prize_round, record.tick
    );

    Ok(())
  }
}
