//! Field validation for incoming requests.
//!
//! Rules are checked in order and the first failure wins; later violations
//! are not collected.

use crate::{Error, Result};

/// A request that can check its own fields before it reaches a store.
pub trait Validate {
  fn validate(&self) -> Result<()>;
}

/// Reject absent, empty, or whitespace-only values.
pub fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
  match value {
    Some(v) if !v.trim().is_empty() => Ok(v),
    _ => Err(Error::Validation(message.to_owned())),
  }
}

/// Accept a value with exactly one `@` that neither starts nor ends it.
pub fn email_address(value: &str, message: &str) -> Result<()> {
  let at_count = value.matches('@').count();
  if at_count == 1 && !value.starts_with('@') && !value.ends_with('@') {
    Ok(())
  } else {
    Err(Error::Validation(message.to_owned()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn required_rejects_blank() {
    assert!(required(None, "m").is_err());
    assert!(required(Some(""), "m").is_err());
    assert!(required(Some(" \t"), "m").is_err());
    assert_eq!(required(Some("x"), "m"), Ok("x"));
  }

  #[test]
  fn email_address_shapes() {
    assert!(email_address("a@b.com", "m").is_ok());
    assert!(email_address("a@b", "m").is_ok());
    assert!(email_address("@b.com", "m").is_err());
    assert!(email_address("a@", "m").is_err());
    assert!(email_address("a@@b", "m").is_err());
    assert!(email_address("ab.com", "m").is_err());
  }
}
