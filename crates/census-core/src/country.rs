//! Countries: reference data that persons point at by identifier.
//!
//! Countries are created once and never mutated or deleted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a country name, enforced by the store schema.
pub const MAX_COUNTRY_NAME_LEN: usize = 20;

/// A persisted country record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub country_id: Uuid,
  /// Unique across the directory; compared case-sensitively.
  pub name:       String,
}

/// Input to the country directory's add operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryAddRequest {
  pub name: Option<String>,
}

impl CountryAddRequest {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()) }
  }

  /// Build the record to persist under `country_id`.
  ///
  /// Returns `None` when the name is absent or empty.
  pub fn to_country(&self, country_id: Uuid) -> Option<Country> {
    let name = self.name.as_deref().filter(|n| !n.is_empty())?;
    Some(Country { country_id, name: name.to_owned() })
  }
}
