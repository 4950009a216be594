use super::*;

#[derive(Clone, Debug, Parser)]
pub struct Holders {
  #[arg(help = "Collection name")]
  pub collection: String,
  #[arg(long, default_value_t = 0, help = "Page index")]
  pub page_index: usize,
  #[arg(long, default_value_t = 20, help = "Page size")]
  pub page_size: usize,
  #[arg(long, help = "Output as JSON")]
  pub json: bool,
}

impl Holders {
  pub(crate) fn run(self, options: Options) -> Result {
    let index = Index::open(&options)?;
    let (holders, total) = index.holders(&self.collection, self.page_index, self.page_size)?;

    if self.json {
      println!("{}", serde_json::to_string_pretty(&holders)?);
      return Ok(());
    }

    println!("{:<6} {:<40} {:>8} {:>8}", "Rank", "Address", "Amount", "Share");
    for holder in &holders {
      println!(
        "{:<6} {:<40} {:>8} {:>8}",
        holder.rank, holder.address, holder.amount, holder.percentage
      );
    }
    println!("\ntotal holders: {total}");

    Ok(())
  }
}
