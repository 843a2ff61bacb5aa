//! Search dispatch: which person field a search text is matched against.
//!
//! The set of searchable fields is closed. Callers resolve a field name at
//! the boundary with [`SearchField::parse`]; a name outside the set resolves
//! to `None`, which callers treat as "no filter".

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::person::Person;

/// Format used when matching search text against a date of birth,
/// e.g. `"07 March 1991"`.
pub const DATE_OF_BIRTH_SEARCH_FORMAT: &str = "%d %B %Y";

/// A person field that supports text search.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
pub enum SearchField {
  PersonName,
  Email,
  Address,
  Gender,
  DateOfBirth,
}

impl SearchField {
  /// Resolve a field name; unknown names yield `None`.
  pub fn parse(name: &str) -> Option<Self> { name.parse().ok() }
}

/// A predicate over stored persons: `text` matched against one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFilter {
  pub field: SearchField,
  pub text:  String,
}

impl PersonFilter {
  pub fn new(field: SearchField, text: impl Into<String>) -> Self {
    Self { field, text: text.into() }
  }

  /// Whether `person` satisfies this filter.
  ///
  /// Text fields match on a case-insensitive substring, gender on a
  /// case-insensitive exact value. A person whose selected field is absent or
  /// empty always matches.
  // TODO: decide whether blank fields should drop out of searches; current
  // listings rely on them matching.
  pub fn matches(&self, person: &Person) -> bool {
    let needle = self.text.to_lowercase();
    match self.field {
      SearchField::PersonName => contains(person.name.as_deref(), &needle),
      SearchField::Email => contains(person.email.as_deref(), &needle),
      SearchField::Address => contains(person.address.as_deref(), &needle),
      SearchField::Gender => match person.gender.as_deref() {
        None | Some("") => true,
        Some(g) => g.to_lowercase() == needle,
      },
      SearchField::DateOfBirth => {
        let formatted = person
          .date_of_birth
          .map(|d| d.format(DATE_OF_BIRTH_SEARCH_FORMAT).to_string());
        contains(formatted.as_deref(), &needle)
      }
    }
  }
}

fn contains(haystack: Option<&str>, needle: &str) -> bool {
  match haystack {
    None | Some("") => true,
    Some(h) => h.to_lowercase().contains(needle),
  }
}
