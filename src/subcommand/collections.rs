use super::*;

#[derive(Clone, Debug, Parser)]
pub struct Collections {
  #[arg(long, help = "Output as JSON")]
  pub json: bool,
}

impl Collections {
  pub(crate) fn run(self, options: Options) -> Result {
    let index = Index::open(&options)?;
    let collections = index.collections()?;

    if self.json {
      println!("{}", serde_json::to_string_pretty(&collections)?);
      return Ok(());
    }

    println!(
      "{:<16} {:<6} {:>10} {:>14} {:>14} {:>8}",
      "Collection", "Tick", "Minted", "Mined", "Pool", "Rounds"
    );
    for record in &collections {
      println!(
        "{:<16} {:<6} {:>4}/{:>5} {:>14} {:>14} {:>8}",
        record.name,
        record.tick,
        record.inscriptions_count,
        record.inscriptions_max,
        record.total_mined_tokens,
        record.prize_pool_tokens,
        record.total_prize_round,
      );
    }
    println!("\ntotal collections: {}", collections.len());

    Ok(())
  }
}
