use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "mrcindex",
  about = "Deterministic indexer for the MRC-721/MRC-20 inscription meta-protocol",
  version
)]
pub struct Arguments {
  #[command(flatten)]
  pub options: Options,
  #[command(subcommand)]
  pub subcommand: Subcommand,
}

impl Arguments {
  pub fn run(self) -> Result {
    self.subcommand.run(self.options)
  }
}
