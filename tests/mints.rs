use super::*;

#[test]
fn mint_caps_are_enforced() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 3, 2, "demo", "100000", "1000", 10, "0.0")).unwrap();

  for (height, id, number, address) in [
    (100, "i0", 0, "alice"),
    (101, "i1", 1, "alice"),
    (102, "i2", 2, "alice"), // dropped: alice at lim
    (103, "i3", 3, "bob"),   // accepted: cap reached
    (104, "i4", 4, "bob"),   // dropped: collection at max
  ] {
    index
      .write_block(block(
        height,
        vec![inscription(id, number, address, height, &payload)],
        Vec::new(),
      ))
      .unwrap();
  }

  let record = index.genesis_record("DEMO").unwrap();
  assert_eq!(record.inscriptions_count, 3);
  assert_eq!(record.inscriptions_max, 3);
  assert_eq!(record.end_id, "i3");
  assert_eq!(record.end_block_height, Some(103));

  assert_eq!(index.address_inventory("alice").unwrap().mrc721, vec!["i0", "i1"]);
  assert_eq!(index.address_inventory("bob").unwrap().mrc721, vec!["i3"]);

  let (members, total) = index.collection_members("DEMO", 0, 10).unwrap();
  assert_eq!(total, 3);
  assert_eq!(members, vec!["i0", "i1", "i3"]);

  // Dropped mints are still indexed as plain inscriptions, outside the
  // collection.
  assert!(index.inscription("i2").is_ok());
  assert_eq!(index.inscription_details("i2").unwrap().sequence, None);
  assert_eq!(index.inscription_details("i3").unwrap().sequence, Some(2));
}

#[test]
fn html_carriers_mint_into_existing_collections() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 5, 5, "demo", "100000", "1000", 10, "0.0")).unwrap();

  index
    .write_block(block(
      100,
      vec![inscription("i0", 0, "alice", 100, &payload)],
      Vec::new(),
    ))
    .unwrap();

  let carrier = br#"<!DOCTYPE html>
<html><body name="Demo" mrc-721="i0"><img src="/content/i0"></body></html>"#;
  index
    .write_block(block(
      101,
      vec![inscription("i1", 1, "bob", 101, carrier)],
      Vec::new(),
    ))
    .unwrap();

  assert_eq!(index.genesis_record("DEMO").unwrap().inscriptions_count, 2);
  assert_eq!(index.inscription_details("i1").unwrap().sequence, Some(1));
}

#[test]
fn svg_carriers_mint_into_existing_collections() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 5, 5, "demo", "100000", "1000", 10, "0.0")).unwrap();

  index
    .write_block(block(
      100,
      vec![inscription("i0", 0, "alice", 100, &payload)],
      Vec::new(),
    ))
    .unwrap();

  let carrier =
    br#"<svg xmlns="http://www.w3.org/2000/svg" mrc721="Demo" mrc721id="i0"></svg>"#;
  index
    .write_block(block(
      101,
      vec![inscription("i1", 1, "bob", 101, carrier)],
      Vec::new(),
    ))
    .unwrap();

  assert_eq!(index.genesis_record("DEMO").unwrap().inscriptions_count, 2);
}

#[test]
fn carriers_referencing_the_wrong_genesis_are_dropped() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 5, 5, "demo", "100000", "1000", 10, "0.0")).unwrap();

  index
    .write_block(block(
      100,
      vec![inscription("i0", 0, "alice", 100, &payload)],
      Vec::new(),
    ))
    .unwrap();

  let carrier =
    br#"<svg xmlns="http://www.w3.org/2000/svg" mrc721="Demo" mrc721id="other"></svg>"#;
  index
    .write_block(block(
      101,
      vec![inscription("i1", 1, "bob", 101, carrier)],
      Vec::new(),
    ))
    .unwrap();

  assert_eq!(index.genesis_record("DEMO").unwrap().inscriptions_count, 1);
}

#[test]
fn mints_must_repeat_the_genesis_protocol() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("Demo", 5, 5, "demo", "100000", "1000", 10, "0.0")).unwrap();
  let altered =
    serde_json::to_vec(&protocol("Demo", 5, 5, "demo", "999999", "1000", 10, "0.0")).unwrap();

  index
    .write_block(block(
      100,
      vec![inscription("i0", 0, "alice", 100, &payload)],
      Vec::new(),
    ))
    .unwrap();
  index
    .write_block(block(
      101,
      vec![inscription("i1", 1, "bob", 101, &altered)],
      Vec::new(),
    ))
    .unwrap();

  assert_eq!(index.genesis_record("DEMO").unwrap().inscriptions_count, 1);
}

#[test]
fn tick_squatting_deploys_are_dropped() {
  let (_dir, index) = open_index();
  let first =
    serde_json::to_vec(&protocol("One", 5, 5, "same", "100000", "1000", 10, "0.0")).unwrap();
  let second =
    serde_json::to_vec(&protocol("Two", 5, 5, "same", "100000", "1000", 10, "0.0")).unwrap();

  index
    .write_block(block(
      100,
      vec![inscription("o0", 0, "alice", 100, &first)],
      Vec::new(),
    ))
    .unwrap();
  index
    .write_block(block(
      101,
      vec![inscription("t0", 1, "bob", 101, &second)],
      Vec::new(),
    ))
    .unwrap();

  assert!(index.collection_exists("ONE").unwrap());
  assert!(!index.collection_exists("TWO").unwrap());
  assert!(index.tick_exists("same").unwrap());
}

#[test]
fn satmine_caps_are_overridden_on_deploy() {
  let (_dir, index) = open_index();
  let payload =
    serde_json::to_vec(&protocol("SatMine", 20000, 1, "sm", "100000", "1000", 10, "0.0")).unwrap();

  index
    .write_block(block(
      100,
      vec![inscription("s0", 0, "alice", 100, &payload)],
      Vec::new(),
    ))
    .unwrap();

  assert_eq!(
    index.genesis_record("SATMINE").unwrap().inscriptions_max,
    13263
  );
}
