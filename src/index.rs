use {self::store::StateRead, super::*, redb::Database, thiserror::Error};

pub mod entry;
pub(crate) mod keys;
mod reader;
pub(crate) mod store;
mod updater;

/// Typed failures of the read surface. Wrapped in [`anyhow::Error`] so
/// callers can downcast when they need to distinguish a missing key from a
/// malformed request.
#[derive(Debug, Error)]
pub enum ReadError {
  #[error("{0} not found")]
  NotFound(String),
  #[error("invalid argument: {0}")]
  InvalidArgument(String),
}

/// Handle over the indexed state.
///
/// One writer at a time: [`Index::write_block`] serializes behind a lock
/// and applies an entire block event as a single write transaction. Read
/// accessors operate on committed snapshots and never observe a block
/// half-applied.
pub struct Index {
  database: Database,
  write_lock: Mutex<()>,
}

impl Index {
  pub fn open(options: &Options) -> Result<Self> {
    let path = options.index_path();

    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)?;
      }
    }

    let database = Database::create(&path)
      .with_context(|| format!("failed to open index at `{}`", path.display()))?;

    let transaction = database.begin_write()?;
    transaction.open_table(store::STATE)?;
    transaction.commit()?;

    Ok(Self {
      database,
      write_lock: Mutex::new(()),
    })
  }

  /// Apply one block event atomically. Re-submitting an already-indexed
  /// height is a successful no-op; gaps below the event are filled with
  /// empty blocks first.
  pub fn write_block(&self, event: BlockEvent) -> Result {
    let _lock = self.write_lock.lock().unwrap();
    updater::Updater { index: self }.write_block(event)
  }

  pub(crate) fn snapshot(&self) -> Result<store::StateSnapshot> {
    Ok(self.database.begin_read()?.open_table(store::STATE)?)
  }
}
