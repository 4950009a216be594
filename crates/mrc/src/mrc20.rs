use super::*;

/// Payload of an MRC-20 fungible-token operation inscription.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mrc20Op {
  #[serde(default)]
  pub p: String,
  #[serde(default)]
  pub op: String,
  #[serde(default)]
  pub tick: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub amt: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dec: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub insc: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mrc20Operation {
  Transfer,
  Burn,
}

impl Display for Mrc20Operation {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Transfer => write!(f, "transfer"),
      Self::Burn => write!(f, "burn"),
    }
  }
}

/// Maximum textual length of the `amt` field.
pub const AMOUNT_MAX_LEN: usize = 666;

impl Mrc20Op {
  pub fn from_json(data: &[u8]) -> Option<Self> {
    let mut op: Self = serde_json::from_slice(data).ok()?;
    op.p = op.p.trim().to_string();
    op.op = op.op.trim().to_string();
    op.tick = op.tick.trim().to_string();
    op.amt = op.amt.map(|amt| amt.trim().to_string());
    op.dec = op.dec.map(|dec| dec.trim().to_string());
    Some(op)
  }

  pub fn operation(&self) -> Option<Mrc20Operation> {
    match self.op.as_str() {
      "transfer" => Some(Mrc20Operation::Transfer),
      "burn" => Some(Mrc20Operation::Burn),
      _ => None,
    }
  }

  /// The declared amount in base units. `None` when the field is missing,
  /// signed, or malformed; balances never go negative, so signed text is
  /// not an amount.
  pub fn amount(&self) -> Option<BigUint> {
    parse_biguint(self.amt.as_deref()?, AMOUNT_MAX_LEN)
  }

  pub fn validate(&self) -> Result<(), ProtocolError> {
    if self.p != MRC20_PROTOCOL {
      return Err(ProtocolError::ProtocolTag);
    }
    self.operation().ok_or(ProtocolError::Operation)?;
    if self.tick.len() > 4 || self.tick != self.tick.to_lowercase() {
      return Err(ProtocolError::Tick);
    }
    self.amount().ok_or(ProtocolError::Amount)?;
    if let Some(dec) = &self.dec {
      if dec != "8" {
        return Err(ProtocolError::Decimals);
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn transfer() -> Mrc20Op {
    Mrc20Op::from_json(br#"{"p": "mrc-20", "op": "transfer", "tick": "demo", "amt": "50"}"#)
      .unwrap()
  }

  #[test]
  fn valid_transfer() {
    let op = transfer();
    assert!(op.validate().is_ok());
    assert_eq!(op.operation(), Some(Mrc20Operation::Transfer));
    assert_eq!(op.amount(), Some(BigUint::from(50u32)));
  }

  #[test]
  fn unknown_operation_is_rejected() {
    let mut op = transfer();
    op.op = "mint".into();
    assert_eq!(op.validate(), Err(ProtocolError::Operation));
  }

  #[test]
  fn signed_amount_is_rejected() {
    let mut op = transfer();
    op.amt = Some("-50".into());
    assert_eq!(op.validate(), Err(ProtocolError::Amount));
  }

  #[test]
  fn oversized_amount_is_rejected() {
    let mut op = transfer();
    op.amt = Some("1".repeat(AMOUNT_MAX_LEN + 1));
    assert_eq!(op.validate(), Err(ProtocolError::Amount));
    op.amt = Some("1".repeat(AMOUNT_MAX_LEN));
    assert!(op.validate().is_ok());
  }

  #[test]
  fn decimals_other_than_eight_are_rejected() {
    let mut op = transfer();
    op.dec = Some("18".into());
    assert_eq!(op.validate(), Err(ProtocolError::Decimals));
    op.dec = Some("8".into());
    assert!(op.validate().is_ok());
  }
}
