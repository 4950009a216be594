use super::*;

fn lottery_protocol(name: &str, tick: &str) -> Vec<u8> {
  let mut value = protocol(name, 10, 5, tick, "1000000", "1000", 100_000_000, "0");
  value["ltry"] = serde_json::json!({
    "pool": "0.1", "intvl": "5", "winp": "1.0", "dist": "0.6",
  });
  serde_json::to_vec(&value).unwrap()
}

#[test]
fn draws_pay_deterministically() {
  let (_dir, index) = open_index();

  index
    .write_block(block(
      200,
      vec![inscription("l0", 0, "alice", 200, &lottery_protocol("Lotto", "lot"))],
      Vec::new(),
    ))
    .unwrap();

  for height in 201..=205 {
    index.write_block(block(height, Vec::new(), Vec::new())).unwrap();
  }

  // Six blocks skimmed 100 each; the draw at genesis+5 pays 60% of 600.
  let record = index.genesis_record("LOTTO").unwrap();
  assert_eq!(record.prize_pool_tokens, BigUint::from(240u32));
  assert_eq!(record.total_prize_pool_tokens, BigUint::from(600u32));
  assert_eq!(record.total_prize_round, 1);

  let rounds = index.lottery_history("LOTTO").unwrap();
  assert_eq!(rounds.len(), 1);
  assert_eq!(rounds[0].height, 205);
  assert_eq!(rounds[0].hash, hash(205));
  assert_eq!(rounds[0].address, "alice");
  assert_eq!(rounds[0].inscription_id, "l0");
  assert_eq!(rounds[0].win_amount, BigUint::from(360u32));
  assert_eq!(rounds[0].jackpot_accum, BigUint::from(600u32));
  assert_eq!(rounds[0].round, 1);
  assert_eq!(rounds[0].winp, "1.0");
  assert_eq!(rounds[0].dist, "0.6");

  // Winner credit: six blocks of 900 mining plus the 360 payout.
  assert_eq!(balance(&index, "alice", "lot"), 6 * 900 + 360);
}

#[test]
fn draws_skip_gap_fill_blocks() {
  let (_dir, index) = open_index();

  index
    .write_block(block(
      200,
      vec![inscription("l0", 0, "alice", 200, &lottery_protocol("Skippy", "skp"))],
      Vec::new(),
    ))
    .unwrap();

  // Heights 201-209 arrive as gap fills with the zero-hash sentinel; only
  // the real block at 210 can draw, even though 205 was on the interval.
  index.write_block(block(210, Vec::new(), Vec::new())).unwrap();

  let rounds = index.lottery_history("SKIPPY").unwrap();
  assert_eq!(rounds.len(), 1);
  assert_eq!(rounds[0].height, 210);

  // Eleven blocks skimmed 100 each before the draw took 60%.
  let record = index.genesis_record("SKIPPY").unwrap();
  assert_eq!(record.prize_pool_tokens, BigUint::from(440u32));
}

#[test]
fn empty_pools_never_draw() {
  let (_dir, index) = open_index();

  // No lottery terms at all: no pool accrues, no rounds appear.
  let payload =
    serde_json::to_vec(&protocol("Plain", 10, 5, "pl", "1000000", "1000", 100_000_000, "0"))
      .unwrap();
  index
    .write_block(block(
      200,
      vec![inscription("p0", 0, "alice", 200, &payload)],
      Vec::new(),
    ))
    .unwrap();
  for height in 201..=210 {
    index.write_block(block(height, Vec::new(), Vec::new())).unwrap();
  }

  assert!(index.lottery_history("PLAIN").unwrap().is_empty());
  assert_eq!(
    index.genesis_record("PLAIN").unwrap().total_prize_round,
    0
  );
}
