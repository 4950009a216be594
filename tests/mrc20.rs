use super::*;

fn transfer_op(tick: &str, amount: &str) -> Vec<u8> {
  serde_json::to_vec(&serde_json::json!({
    "p": "mrc-20", "op": "transfer", "tick": tick, "amt": amount,
  }))
  .unwrap()
}

#[test]
fn transfer_chain_moves_balances() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 10, 5, "dm", "1000000", "100", 100_000_000, "0")).unwrap();

  index
    .write_block(block(
      300,
      vec![inscription("d0", 0, "alice", 300, &payload)],
      Vec::new(),
    ))
    .unwrap();
  assert_eq!(balance(&index, "alice", "dm"), 100);

  // Inscribing the transfer debits alice and parks 50 on the inscription.
  index
    .write_block(block(
      301,
      vec![inscription("t1", 1, "alice", 301, &transfer_op("dm", "50"))],
      Vec::new(),
    ))
    .unwrap();
  assert_eq!(balance(&index, "alice", "dm"), 100 - 50 + 100);
  assert_eq!(
    index.address_inventory("alice").unwrap().mrc20_pending,
    vec!["t1"]
  );

  // Sending the inscription to bob settles the parked amount.
  index
    .write_block(block(302, Vec::new(), vec![transfer("t1", "bob")]))
    .unwrap();
  assert_eq!(balance(&index, "alice", "dm"), 250);
  assert_eq!(balance(&index, "bob", "dm"), 50);
  assert!(index
    .address_inventory("alice")
    .unwrap()
    .mrc20_pending
    .is_empty());
  assert!(index
    .address_inventory("bob")
    .unwrap()
    .mrc20_pending
    .is_empty());

  // A second send of the same inscription is a plain satoshi move; the
  // pending amount was already consumed.
  index
    .write_block(block(303, Vec::new(), vec![transfer("t1", "carol")]))
    .unwrap();
  assert_eq!(balance(&index, "carol", "dm"), 0);
}

#[test]
fn insufficient_balance_transfers_are_dropped() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 10, 5, "dm", "1000000", "100", 100_000_000, "0")).unwrap();

  index
    .write_block(block(
      300,
      vec![inscription("d0", 0, "alice", 300, &payload)],
      Vec::new(),
    ))
    .unwrap();
  index
    .write_block(block(
      301,
      vec![inscription("t1", 1, "alice", 301, &transfer_op("dm", "1000"))],
      Vec::new(),
    ))
    .unwrap();

  // The oversized transfer was dropped; only mining touched the balance.
  assert_eq!(balance(&index, "alice", "dm"), 200);
  assert!(index
    .address_inventory("alice")
    .unwrap()
    .mrc20_pending
    .is_empty());
}

#[test]
fn transfers_for_unknown_ticks_are_dropped() {
  let (_dir, index) = open_index();

  index
    .write_block(block(
      300,
      vec![inscription("t1", 0, "alice", 300, &transfer_op("nope", "5"))],
      Vec::new(),
    ))
    .unwrap();

  assert!(index
    .address_inventory("alice")
    .unwrap()
    .mrc20_pending
    .is_empty());
  assert_eq!(balance(&index, "alice", "nope"), 0);
}

#[test]
fn burns_without_a_target_are_dropped() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 10, 5, "dm", "1000000", "100", 100_000_000, "0")).unwrap();

  index
    .write_block(block(
      300,
      vec![inscription("d0", 0, "alice", 300, &payload)],
      Vec::new(),
    ))
    .unwrap();

  let burn = serde_json::json!({"p": "mrc-20", "op": "burn", "tick": "dm", "amt": "10"});
  index
    .write_block(block(
      301,
      vec![inscription("b1", 1, "alice", 301, &serde_json::to_vec(&burn).unwrap())],
      Vec::new(),
    ))
    .unwrap();

  assert_eq!(balance(&index, "alice", "dm"), 200);
  assert_eq!(
    index.genesis_record("DEMO").unwrap().total_burn,
    BigUint::default()
  );
}

#[test]
fn burnt_pending_transfers_credit_the_burn_address() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 10, 5, "dm", "1000000", "100", 100_000_000, "0")).unwrap();

  index
    .write_block(block(
      300,
      vec![inscription("d0", 0, "alice", 300, &payload)],
      Vec::new(),
    ))
    .unwrap();
  index
    .write_block(block(
      301,
      vec![inscription("t1", 1, "alice", 301, &transfer_op("dm", "30"))],
      Vec::new(),
    ))
    .unwrap();

  let mut burnt = transfer("t1", "ignored");
  burnt.kind = "burnt".into();
  index.write_block(block(302, Vec::new(), vec![burnt])).unwrap();

  assert_eq!(balance(&index, BURN_ADDRESS, "dm"), 30);
  assert!(index
    .address_inventory("alice")
    .unwrap()
    .mrc20_pending
    .is_empty());
}
