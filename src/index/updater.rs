use {
  self::{
    inscription_updater::InscriptionUpdater, lottery_updater::LotteryUpdater,
    mine_updater::MineUpdater, transfer_updater::TransferUpdater,
  },
  super::*,
};

mod inscription_updater;
mod lottery_updater;
mod mine_updater;
mod transfer_updater;

/// Applies one block event, and any synthesized gap-fill blocks below it,
/// inside a single write transaction. Phase order per block: inscription
/// reveals, transfers, mining, lottery.
pub(crate) struct Updater<'index> {
  pub(crate) index: &'index Index,
}

impl Updater<'_> {
  pub(crate) fn write_block(&self, event: BlockEvent) -> Result {
    let transaction = self.index.database.begin_write()?;

    let applied = {
      let mut state = transaction.open_table(store::STATE)?;
      self.apply(&mut state, event)?
    };

    if applied {
      transaction.commit()?;
    } else {
      transaction.abort()?;
    }

    Ok(())
  }

  fn apply(&self, state: &mut store::State, event: BlockEvent) -> Result<bool> {
    let latest = state.get_u64(keys::LATEST_BLOCK)?;

    if let Some(latest) = latest {
      if event.height <= latest {
        info!(
          "block {} at or below indexed tip {latest}, ignoring",
          event.height
        );
        return Ok(false);
      }
    }

    let event = self.filter_transfers(state, event)?;

    info!(
      "indexing block {} with {} inscriptions and {} transfers",
      event.height,
      event.inscriptions.len(),
      event.transfers.len(),
    );

    let mut blocks = Vec::new();
    if let Some(latest) = latest {
      for height in latest + 1..event.height {
        blocks.push(BlockEvent::empty(height));
      }
    }
    blocks.push(event);

    for block in &blocks {
      self.apply_block(state, block)?;

      store::put_json(state, &keys::block(block.height), block)?;
      store::put_text(
        state,
        &keys::block_hash(&block.hash),
        &block.height.to_string(),
      )?;
      store::put_text(state, keys::LATEST_BLOCK, &block.height.to_string())?;
    }

    Ok(true)
  }

  /// Retain only transfers of inscriptions this index has admitted into
  /// either protocol family. Probes are anchored on the `::` separator so
  /// an id that is a prefix of another id cannot match its keys.
  fn filter_transfers(&self, state: &store::State, event: BlockEvent) -> Result<BlockEvent> {
    let mut event = event;
    let total = event.transfers.len();

    let transfers = std::mem::take(&mut event.transfers);
    for transfer in transfers {
      let known = state.exists_prefix(&keys::mrc721::owner_prefix(&transfer.id))?
        || state.exists_prefix(&keys::mrc20::owner_prefix(&transfer.id))?;
      if known {
        event.transfers.push(transfer);
      }
    }

    if event.transfers.len() < total {
      info!(
        "dropped {} transfers of unindexed inscriptions at block {}",
        total - event.transfers.len(),
        event.height,
      );
    }

    Ok(event)
  }

  fn apply_block(&self, state: &mut store::State, block: &BlockEvent) -> Result {
    InscriptionUpdater { block }.index_inscriptions(state)?;
    TransferUpdater { block }.index_transfers(state)?;
    MineUpdater { block }.mine(state)?;
    LotteryUpdater { block }.draw(state)?;
    Ok(())
  }
}
