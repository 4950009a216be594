use super::*;

#[derive(Clone, Debug, Parser)]
pub struct Status {}

impl Status {
  pub(crate) fn run(self, options: Options) -> Result {
    let index = Index::open(&options)?;

    match index.latest_height()? {
      Some(height) => println!("height: {height}"),
      None => println!("height: empty"),
    }

    let collections = index.collections()?;
    println!("collections: {}", collections.len());
    for record in &collections {
      println!(
        "  {} ({}) {}/{} minted, {} mined, pool {}",
        record.name,
        record.tick,
        record.inscriptions_count,
        record.inscriptions_max,
        record.total_mined_tokens,
        record.prize_pool_tokens,
      );
    }

    Ok(())
  }
}
