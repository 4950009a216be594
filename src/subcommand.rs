use super::*;

pub mod apply;
pub mod balances;
pub mod collections;
pub mod holders;
pub mod lottery;
pub mod status;

#[derive(Debug, Parser)]
pub enum Subcommand {
  #[command(about = "Apply a file of newline-delimited JSON block events")]
  Apply(apply::Apply),
  #[command(about = "Show address balances")]
  Balances(balances::Balances),
  #[command(about = "List indexed collections")]
  Collections(collections::Collections),
  #[command(about = "List holders of a collection")]
  Holders(holders::Holders),
  #[command(about = "Show a collection's lottery history")]
  Lottery(lottery::Lottery),
  #[command(about = "Print index status")]
  Status(status::Status),
}

impl Subcommand {
  pub fn run(self, options: Options) -> Result {
    match self {
      Self::Apply(apply) => apply.run(options),
      Self::Balances(balances) => balances.run(options),
      Self::Collections(collections) => collections.run(options),
      Self::Holders(holders) => holders.run(options),
      Self::Lottery(lottery) => lottery.run(options),
      Self::Status(status) => status.run(options),
    }
  }
}
