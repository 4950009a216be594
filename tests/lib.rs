use {
  mrcindex::{
    BlockEvent, Index, Inscription, Options, TransferEvent, BURN_ADDRESS, EMPTY_BLOCK_HASH,
  },
  num_bigint::BigUint,
  serde_json::json,
  tempfile::TempDir,
};

mod lottery;
mod mints;
mod mrc20;

fn open_index() -> (TempDir, Index) {
  let dir = TempDir::new().unwrap();
  let options = Options {
    data_dir: Some(dir.path().into()),
    index: None,
  };
  let index = Index::open(&options).unwrap();
  (dir, index)
}

fn protocol(
  name: &str,
  max: u64,
  lim: u64,
  tick: &str,
  total: &str,
  beg: &str,
  halv: u64,
  dcr: &str,
) -> serde_json::Value {
  json!({
    "p": "mrc-721",
    "miner": {"name": name, "max": max.to_string(), "lim": lim.to_string()},
    "token": {"tick": tick, "total": total, "beg": beg, "halv": halv.to_string(), "dcr": dcr},
  })
}

fn inscription(id: &str, number: i64, address: &str, height: u64, content: &[u8]) -> Inscription {
  Inscription {
    id: id.into(),
    number,
    address: address.into(),
    block_height: height as i64,
    content_byte: Some(content.to_vec()),
    content_type: "application/json".into(),
    content_length: content.len() as i64,
    ..Default::default()
  }
}

fn block(height: u64, inscriptions: Vec<Inscription>, transfers: Vec<TransferEvent>) -> BlockEvent {
  BlockEvent {
    height,
    hash: hash(height),
    timestamp: height as i64 * 600,
    inscriptions,
    transfers,
    ..Default::default()
  }
}

/// A deterministic nonzero block hash whose hex value is the height.
fn hash(height: u64) -> String {
  format!("0x{height:064x}")
}

fn transfer(id: &str, to: &str) -> TransferEvent {
  TransferEvent {
    id: id.into(),
    kind: "transferred".into(),
    to_address: to.into(),
    ..Default::default()
  }
}

fn balance(index: &Index, address: &str, tick: &str) -> u64 {
  u64::try_from(index.balance(address, tick).unwrap()).unwrap()
}
