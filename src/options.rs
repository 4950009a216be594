use super::*;

#[derive(Clone, Default, Debug, Parser)]
pub struct Options {
  #[arg(long, alias = "datadir", help = "Store the index in <DATA_DIR>.")]
  pub data_dir: Option<PathBuf>,
  #[arg(long, help = "Use index file at <INDEX>.")]
  pub index: Option<PathBuf>,
}

impl Options {
  pub fn index_path(&self) -> PathBuf {
    if let Some(index) = &self.index {
      return index.clone();
    }

    self
      .data_dir
      .clone()
      .unwrap_or_else(|| PathBuf::from("."))
      .join("mrcindex.redb")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_index_path_wins() {
    let options = Options {
      data_dir: Some("/var/data".into()),
      index: Some("/tmp/custom.redb".into()),
    };
    assert_eq!(options.index_path(), PathBuf::from("/tmp/custom.redb"));
  }

  #[test]
  fn index_path_defaults_into_data_dir() {
    let options = Options {
      data_dir: Some("/var/data".into()),
      index: None,
    };
    assert_eq!(options.index_path(), PathBuf::from("/var/data/mrcindex.redb"));
  }
}
