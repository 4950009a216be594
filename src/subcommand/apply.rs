use {
  super::*,
  std::io::{self, BufRead},
};

#[derive(Clone, Debug, Parser)]
pub struct Apply {
  #[arg(help = "File of newline-delimited JSON block events, in height order")]
  pub events: PathBuf,
}

impl Apply {
  pub(crate) fn run(self, options: Options) -> Result {
    let index = Index::open(&options)?;

    let file = fs::File::open(&self.events)
      .with_context(|| format!("failed to open `{}`", self.events.display()))?;

    let mut applied = 0u64;
    for (number, line) in io::BufReader::new(file).lines().enumerate() {
      let line = line?;
      if line.trim().is_empty() {
        continue;
      }

      let event: BlockEvent = serde_json::from_str(&line)
        .with_context(|| format!("malformed block event on line {}", number + 1))?;
      index.write_block(event)?;
      applied += 1;
    }

    match index.latest_height()? {
      Some(height) => println!("applied {applied} events, height {height}"),
      None => println!("applied {applied} events, index empty"),
    }

    Ok(())
  }
}
