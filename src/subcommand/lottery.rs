use super::*;

#[derive(Clone, Debug, Parser)]
pub struct Lottery {
  #[arg(help = "Collection name")]
  pub collection: String,
  #[arg(long, help = "Output as JSON")]
  pub json: bool,
}

impl Lottery {
  pub(crate) fn run(self, options: Options) -> Result {
    let index = Index::open(&options)?;
    let rounds = index.lottery_history(&self.collection)?;

    if self.json {
      println!("{}", serde_json::to_string_pretty(&rounds)?);
      return Ok(());
    }

    println!(
      "{:<6} {:>10} {:<40} {:>14} {:>14}",
      "Round", "Height", "Winner", "Amount", "Jackpot"
    );
    for round in &rounds {
      println!(
        "{:<6} {:>10} {:<40} {:>14} {:>14}",
        round.round, round.height, round.address, round.win_amount, round.jackpot_accum
      );
    }
    println!("\ntotal rounds: {}", rounds.len());

    Ok(())
  }
}
