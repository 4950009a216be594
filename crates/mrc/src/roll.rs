use super::*;

#[derive(Debug, PartialEq, Error)]
pub enum RollError {
  #[error("roll limit must be nonzero")]
  ZeroLimit,
  #[error("block hash is not valid hex")]
  InvalidHash,
}

/// Derive a deterministic roll in `[0, limit)` from a block hash by reading
/// the hex digits as a big-endian integer and reducing modulo `limit`.
///
/// Every draw derives from the full hash integer; rolls with different
/// limits are independent reductions of the same value, not residuals of
/// each other.
pub fn hash_roll(hash: &str, limit: u64) -> Result<u64, RollError> {
  if limit == 0 {
    return Err(RollError::ZeroLimit);
  }
  if limit == 1 {
    return Ok(0);
  }
  let digits = hash.strip_prefix("0x").unwrap_or(hash);
  let value = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or(RollError::InvalidHash)?;
  Ok(
    (value % limit)
      .try_into()
      .expect("residue is below a u64 limit"),
  )
}
