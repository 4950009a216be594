use super::*;

/// Base weight of every mint inscription in the reward split.
pub(crate) const BASE_POWER: u64 = 1000;

/// Burn-boosted power is capped at eleven times the base.
pub(crate) const POWER_CAP: u64 = 11000;

/// Phase (c): per-collection block rewards. Collections are visited in
/// lexicographic key order; members likewise. Both orders are part of the
/// determinism contract.
pub(super) struct MineUpdater<'a> {
  pub(super) block: &'a BlockEvent,
}

struct Miner {
  id: String,
  number: i64,
  address: String,
  power: BigUint,
  share: BigUint,
}

impl MineUpdater<'_> {
  pub(super) fn mine(&self, state: &mut store::State) -> Result {
    for name in state.prefix_suffixes(keys::mrc721::GENESIS_PREFIX)? {
      self.mine_collection(state, &name)?;
    }
    Ok(())
  }

  fn mine_collection(&self, state: &mut store::State, name: &str) -> Result {
    let genesis_key = keys::mrc721::genesis(name);
    let mut record: GenesisRecord = state.get_json(&genesis_key)?
      .ok_or_else(|| anyhow!("collection {name} disappeared mid-block"))?;

    let canonical = state.canonical_protocol(&record)?;
    let total = canonical
      .token
      .total()
      .ok_or_else(|| anyhow!("stored genesis for {name} has an invalid total"))?;

    let issued = &record.total_mined_tokens + &record.total_prize_pool_tokens;
    if issued > total {
      bail!("collection {name} issued {issued} of {total} tokens");
    }
    let remaining = total - issued;
    if remaining.is_zero() {
      // Supply exhausted; mining has ended.
      return Ok(());
    }

    let mut per_block = self.per_block_emission(&record, &canonical)?;
    if per_block > remaining {
      per_block = remaining;
    }
    if per_block.is_zero() {
      // Decay rounded the emission away; mining has ended.
      return Ok(());
    }

    let pool_skim = canonical
      .ltry
      .as_ref()
      .map(|ltry| ltry.pool().of(&per_block))
      .unwrap_or_default();
    per_block -= &pool_skim;

    let mut miners = self.collect_miners(state, name, &canonical)?;
    let residual = distribute(&per_block, &mut miners);
    let distributed = &per_block - &residual;

    for miner in &miners {
      store::put_raw_biguint(state, &keys::mrc721::power(&miner.id), &miner.power)?;

      if miner.share.is_zero() {
        continue;
      }

      let mined_key = keys::mrc721::mined(&miner.id);
      let mined = state.get_raw_biguint(&mined_key)? + &miner.share;
      store::put_raw_biguint(state, &mined_key, &mined)?;

      let balance_key = keys::mrc20::balance(&miner.address, &record.tick);
      let balance = state.get_decimal(&balance_key)?.unwrap_or_default();
      store::put_decimal(state, &balance_key, &(balance + &miner.share))?;
    }

    record.prize_pool_tokens += &pool_skim;
    record.total_prize_pool_tokens += &pool_skim;
    record.total_mined_tokens += &distributed;
    store::put_json(state, &genesis_key, &record)
  }

  /// Emission for this block: `beg` decayed once per elapsed halving
  /// period, `x ← x · (1000 − dcr) / 1000` with integer division.
  fn per_block_emission(
    &self,
    record: &GenesisRecord,
    canonical: &Mrc721Protocol,
  ) -> Result<BigUint> {
    let beg = canonical
      .token
      .beg()
      .ok_or_else(|| anyhow!("stored genesis for {} has an invalid beg", record.name))?;
    let halv = canonical
      .token
      .halv()
      .ok_or_else(|| anyhow!("stored genesis for {} has an invalid halv", record.name))?;
    let dcr = canonical.token.dcr().value();

    let rounds = (self.block.height - record.genesis_block_height) / halv;

    if dcr == 0 {
      return Ok(beg);
    }

    let mut emission = beg;
    for _ in 0..rounds {
      if emission.is_zero() {
        break;
      }
      emission = emission * (1000 - dcr) / 1000u32;
    }
    Ok(emission)
  }

  fn collect_miners(
    &self,
    state: &store::State,
    name: &str,
    canonical: &Mrc721Protocol,
  ) -> Result<Vec<Miner>> {
    let burn_terms = canonical
      .burn
      .as_ref()
      .and_then(|burn| Some((burn.unit()?, burn.boost().value())));

    let mut miners = Vec::new();
    for id in state.prefix_suffixes(&keys::mrc721::member_prefix(name))? {
      let Some(inscription) = state.get_json::<Inscription>(&keys::inscription(&id))?
      else {
        warn!("member inscription {id} of {name} missing, skipping");
        continue;
      };

      let mut power = BigUint::from(BASE_POWER);
      if let Some((unit, boost)) = &burn_terms {
        let burned = state.get_raw_biguint(&keys::mrc721::burn(&id))?;
        power += burned / unit * *boost;
        let cap = BigUint::from(POWER_CAP);
        if power > cap {
          power = cap;
        }
      }

      miners.push(Miner {
        id,
        number: inscription.number,
        address: inscription.address,
        power,
        share: BigUint::default(),
      });
    }

    Ok(miners)
  }
}

/// Split `per_block` across miners in proportion to power, floor division;
/// what the floors leave over is the residual and is simply not emitted
/// this block. Under scarcity (fewer tokens than miners) the strongest
/// miners get one token each, ties broken by inscription number.
fn distribute(per_block: &BigUint, miners: &mut [Miner]) -> BigUint {
  if miners.is_empty() {
    return per_block.clone();
  }

  let total_power = miners.iter().map(|miner| &miner.power).sum::<BigUint>();
  if total_power.is_zero() {
    return per_block.clone();
  }

  if *per_block >= BigUint::from(miners.len()) {
    let mut allocated = BigUint::default();
    for miner in miners.iter_mut() {
      miner.share = per_block * &miner.power / &total_power;
      allocated += &miner.share;
    }
    per_block - allocated
  } else {
    miners.sort_by_key(|miner| (Reverse(miner.power.clone()), miner.number));
    let mut left = per_block.clone();
    for miner in miners.iter_mut() {
      if left.is_zero() {
        break;
      }
      miner.share = BigUint::from(1u32);
      left -= 1u32;
    }
    left
  }
}
