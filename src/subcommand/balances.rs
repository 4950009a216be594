use super::*;

#[derive(Clone, Debug, Parser)]
pub struct Balances {
  #[arg(help = "Address to query")]
  pub address: String,
  #[arg(long, help = "Restrict to a single tick")]
  pub tick: Option<String>,
  #[arg(long, help = "Output as JSON")]
  pub json: bool,
}

impl Balances {
  pub(crate) fn run(self, options: Options) -> Result {
    let index = Index::open(&options)?;

    let balances = match &self.tick {
      Some(tick) => vec![TokenBalance {
        tick: tick.to_lowercase(),
        balance: index.balance(&self.address, &tick.to_lowercase())?,
      }],
      None => index.balances(&self.address)?,
    };

    if self.json {
      println!("{}", serde_json::to_string_pretty(&balances)?);
    } else {
      println!("{:<8} {}", "Tick", "Balance");
      for entry in &balances {
        println!("{:<8} {}", entry.tick, entry.balance);
      }
    }

    Ok(())
  }
}
