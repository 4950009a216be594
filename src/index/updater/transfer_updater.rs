use super::*;

/// Phase (b): relocate inscription ownership and settle pending MRC-20
/// amounts. An inscription is in at most one protocol family; both
/// branches probe independently and in order.
pub(super) struct TransferUpdater<'a> {
  pub(super) block: &'a BlockEvent,
}

impl TransferUpdater<'_> {
  pub(super) fn index_transfers(&self, state: &mut store::State) -> Result {
    for transfer in &self.block.transfers {
      let Some(to_address) = transfer.destination() else {
        warn!(
          "unknown transfer type `{}` for {}, dropping",
          transfer.kind, transfer.id
        );
        continue;
      };

      self.relocate_mrc721(state, transfer, to_address)?;
      self.consume_mrc20(state, transfer, to_address)?;
    }

    Ok(())
  }

  fn relocate_mrc721(
    &self,
    state: &mut store::State,
    transfer: &TransferEvent,
    to_address: &str,
  ) -> Result {
    let Some(old_address) =
      state.first_suffix(&keys::mrc721::owner_prefix(&transfer.id))?
    else {
      return Ok(());
    };

    store::delete(state, &keys::mrc721::owner(&transfer.id, &old_address))?;
    store::put_bytes(state, &keys::mrc721::owner(&transfer.id, to_address), &[])?;

    let old_holdings = keys::mrc721::holdings(&old_address, &transfer.id);
    if !state.exists(&old_holdings)? {
      bail!("owner indexes out of sync for inscription {}", transfer.id);
    }
    store::delete(state, &old_holdings)?;
    store::put_bytes(state, &keys::mrc721::holdings(to_address, &transfer.id), &[])?;

    let key = keys::inscription(&transfer.id);
    let mut inscription: Inscription = state.get_json(&key)?
      .ok_or_else(|| anyhow!("transferred inscription {} missing", transfer.id))?;
    inscription.address = to_address.into();
    store::put_json(state, &key, &inscription)?;

    Ok(())
  }

  /// Credit the parked amount to the destination and consume the pending
  /// indexes. The pending op is re-parsed from the inscription content;
  /// a pending index over unparseable content is an invariant breach.
  fn consume_mrc20(
    &self,
    state: &mut store::State,
    transfer: &TransferEvent,
    to_address: &str,
  ) -> Result {
    let Some(old_address) = state.first_suffix(&keys::mrc20::owner_prefix(&transfer.id))?
    else {
      return Ok(());
    };

    let inscription: Inscription = state.get_json(&keys::inscription(&transfer.id))?
      .ok_or_else(|| anyhow!("pending inscription {} missing", transfer.id))?;
    let content = inscription
      .content_byte
      .as_deref()
      .ok_or_else(|| anyhow!("pending inscription {} has no content", transfer.id))?;
    let op = Mrc20Op::from_json(content)
      .ok_or_else(|| anyhow!("pending inscription {} does not parse", transfer.id))?;
    let amount = op
      .amount()
      .ok_or_else(|| anyhow!("pending inscription {} has an invalid amount", transfer.id))?;

    let balance_key = keys::mrc20::balance(to_address, &op.tick);
    let balance = state.get_decimal(&balance_key)?.unwrap_or_default();
    store::put_decimal(state, &balance_key, &(balance + &amount))?;

    store::delete(state, &keys::mrc20::pending_by_tick(&op.tick, &transfer.id))?;
    store::delete(state, &keys::mrc20::pending(&old_address, &transfer.id))?;
    store::delete(state, &keys::mrc20::owner(&transfer.id, &old_address))?;

    info!(
      "transfer {} credited {amount} {} to {to_address}",
      transfer.id, op.tick
    );

    Ok(())
  }
}
