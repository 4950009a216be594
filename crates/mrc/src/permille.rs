use super::*;

/// A fixed-point fraction in thousandths, parsed from protocol text such as
/// `"0.055"`.
///
/// Parsing mirrors the historical indexer exactly: the text is read as a
/// float, multiplied by 1000, and truncated toward zero. Changing the
/// rounding would alter historical payouts, so truncation is load-bearing.
/// Text that fails to parse yields zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Permille(i64);

impl Permille {
  pub const MAX: i64 = 1000;

  pub fn parse(text: &str) -> Self {
    let Ok(value) = text.parse::<f64>() else {
      return Self(0);
    };
    Self((value * 1000.0) as i64)
  }

  /// Validate a protocol percentage field: printable length at most five
  /// characters, converted value in `[0, 1000]`.
  pub fn validate_field(text: &str) -> Result<Self, ProtocolError> {
    if text.len() > 5 {
      return Err(ProtocolError::PermilleLength);
    }
    let permille = Self::parse(text);
    if permille.0 < 0 || permille.0 > Self::MAX {
      return Err(ProtocolError::PermilleRange);
    }
    Ok(permille)
  }

  pub fn value(self) -> u64 {
    self.0.clamp(0, Self::MAX) as u64
  }

  /// `amount · permille / 1000`, floor division.
  pub fn of(self, amount: &BigUint) -> BigUint {
    amount * self.value() / 1000u32
  }
}

impl Display for Permille {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
