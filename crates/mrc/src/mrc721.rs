use super::*;

/// Payload of an MRC-721 genesis inscription, carrying the full parameter
/// set of a collection and its companion fungible token. Mint inscriptions
/// repeat this payload verbatim (or reference it through an HTML/SVG
/// carrier), so equality on the normalized value is the mint check.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mrc721Protocol {
  #[serde(default)]
  pub p: String,
  #[serde(default)]
  pub miner: MinerTerms,
  #[serde(default)]
  pub token: TokenTerms,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ltry: Option<LotteryTerms>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub burn: Option<BurnTerms>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MinerTerms {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub max: String,
  #[serde(default)]
  pub lim: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenTerms {
  #[serde(default)]
  pub tick: String,
  #[serde(default)]
  pub total: String,
  #[serde(default)]
  pub beg: String,
  #[serde(default)]
  pub halv: String,
  #[serde(default)]
  pub dcr: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LotteryTerms {
  #[serde(default)]
  pub pool: String,
  #[serde(default)]
  pub intvl: String,
  #[serde(default)]
  pub winp: String,
  #[serde(default)]
  pub dist: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BurnTerms {
  #[serde(default)]
  pub unit: String,
  #[serde(default)]
  pub boost: String,
}

impl Mrc721Protocol {
  /// Decode from JSON and normalize. Shape errors yield `None`; protocol
  /// rule violations are reported by [`Mrc721Protocol::validate`].
  pub fn from_json(data: &[u8]) -> Option<Self> {
    let mut protocol: Self = serde_json::from_slice(data).ok()?;
    protocol.normalize();
    Some(protocol)
  }

  fn normalize(&mut self) {
    fn trim(field: &mut String) {
      *field = field.trim().to_string();
    }

    trim(&mut self.p);
    trim(&mut self.miner.name);
    trim(&mut self.miner.max);
    trim(&mut self.miner.lim);
    trim(&mut self.token.tick);
    trim(&mut self.token.total);
    trim(&mut self.token.beg);
    trim(&mut self.token.halv);
    trim(&mut self.token.dcr);
    if let Some(ltry) = &mut self.ltry {
      trim(&mut ltry.pool);
      trim(&mut ltry.intvl);
      trim(&mut ltry.winp);
      trim(&mut ltry.dist);
    }
    if let Some(burn) = &mut self.burn {
      trim(&mut burn.unit);
      trim(&mut burn.boost);
    }

    // Caps for the SATMINE collection were fixed by community vote after a
    // misprinted initial supply; the declared values are overridden.
    if self.miner.upper_name() == "SATMINE" {
      self.miner.max = "13263".into();
      self.miner.lim = "100".into();
    }
  }

  pub fn validate(&self) -> Result<(), ProtocolError> {
    if self.p != MRC721_PROTOCOL {
      return Err(ProtocolError::ProtocolTag);
    }
    self.token.validate()?;
    self.miner.validate()?;
    if let Some(ltry) = &self.ltry {
      ltry.validate()?;
    }
    if let Some(burn) = &self.burn {
      burn.validate(&self.token)?;
    }
    Ok(())
  }
}

impl MinerTerms {
  /// Collection names are indexed uppercased; the declared casing is kept
  /// separately for display.
  pub fn upper_name(&self) -> String {
    self.name.to_uppercase()
  }

  pub fn max(&self) -> Option<u64> {
    parse_bounded(&self.max)
  }

  pub fn lim(&self) -> Option<u64> {
    parse_bounded(&self.lim)
  }

  fn validate(&self) -> Result<(), ProtocolError> {
    let max = self.max().ok_or(ProtocolError::MinerMax)?;
    let lim = self.lim().ok_or(ProtocolError::MinerLim)?;
    if lim > max {
      return Err(ProtocolError::MinerLim);
    }
    Ok(())
  }
}

impl TokenTerms {
  /// Tickers are indexed lowercased; the declared casing is kept separately
  /// for display.
  pub fn lower_tick(&self) -> String {
    self.tick.to_lowercase()
  }

  pub fn total(&self) -> Option<BigUint> {
    parse_biguint(&self.total, 100)
  }

  pub fn beg(&self) -> Option<BigUint> {
    parse_biguint(&self.beg, 100)
  }

  pub fn halv(&self) -> Option<u64> {
    parse_bounded(&self.halv)
  }

  pub fn dcr(&self) -> Permille {
    Permille::parse(&self.dcr)
  }

  fn validate(&self) -> Result<(), ProtocolError> {
    if self.tick.len() > 4 || self.tick != self.lower_tick() {
      return Err(ProtocolError::Tick);
    }
    let total = self.total().ok_or(ProtocolError::TokenTotal)?;
    let beg = self.beg().ok_or(ProtocolError::TokenBeg)?;
    if beg > total {
      return Err(ProtocolError::TokenBeg);
    }
    self.halv().ok_or(ProtocolError::TokenHalv)?;
    Permille::validate_field(&self.dcr)?;
    Ok(())
  }
}

impl LotteryTerms {
  pub fn pool(&self) -> Permille {
    Permille::parse(&self.pool)
  }

  pub fn intvl(&self) -> Option<u64> {
    parse_bounded(&self.intvl)
  }

  pub fn winp(&self) -> Permille {
    Permille::parse(&self.winp)
  }

  pub fn dist(&self) -> Permille {
    Permille::parse(&self.dist)
  }

  fn validate(&self) -> Result<(), ProtocolError> {
    Permille::validate_field(&self.pool)?;
    Permille::validate_field(&self.winp)?;
    Permille::validate_field(&self.dist)?;
    self.intvl().ok_or(ProtocolError::LotteryInterval)?;
    Ok(())
  }
}

impl BurnTerms {
  pub fn unit(&self) -> Option<BigUint> {
    parse_biguint(&self.unit, 100)
  }

  pub fn boost(&self) -> Permille {
    Permille::parse(&self.boost)
  }

  fn validate(&self, token: &TokenTerms) -> Result<(), ProtocolError> {
    let total = token.total().ok_or(ProtocolError::TokenTotal)?;
    let unit = self.unit().ok_or(ProtocolError::BurnUnit)?;
    if unit.is_zero() || unit > total {
      return Err(ProtocolError::BurnUnit);
    }
    Permille::validate_field(&self.boost)?;
    Ok(())
  }
}
