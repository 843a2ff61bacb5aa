//! Person records and the requests that create and overwrite them.
//!
//! A person points at its country by identifier only. Resolving that
//! identifier to a name is an explicit lookup performed when a view is built;
//! the record never owns or caches the country.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use crate::{
  Result,
  validate::{Validate, email_address, required},
};

/// Maximum lengths enforced by the store schema.
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 50;
pub const MAX_GENDER_LEN: usize = 10;
pub const MAX_ADDRESS_LEN: usize = 100;
/// A tax identifier, when present, is exactly this many characters.
pub const TAX_ID_LEN: usize = 8;

// ─── Gender ──────────────────────────────────────────────────────────────────

/// The closed set of genders a request may carry.
///
/// Persisted and displayed as the variant name (`"Male"`); parsed
/// case-insensitively.
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
#[strum(ascii_case_insensitive)]
pub enum Gender {
  Male,
  Female,
  Other,
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub person_id:           Uuid,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  /// Stored as free text; written from [`Gender`]'s display form.
  pub gender:              Option<String>,
  /// Weak reference to a [`Country`](crate::country::Country).
  pub country_id:          Option<Uuid>,
  pub address:             Option<String>,
  pub receive_newsletters: bool,
  /// Tax identification number. The store substitutes its default when this
  /// is `None` on insert.
  pub tax_id:              Option<String>,
}

// ─── Add ─────────────────────────────────────────────────────────────────────

/// Input to the person service's add operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonAddRequest {
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<Gender>,
  pub country_id:          Option<Uuid>,
  pub address:             Option<String>,
  #[serde(default)]
  pub receive_newsletters: bool,
}

impl PersonAddRequest {
  /// Build the record to persist under `person_id`.
  pub fn to_person(&self, person_id: Uuid) -> Person {
    Person {
      person_id,
      name: self.name.clone(),
      email: self.email.clone(),
      date_of_birth: self.date_of_birth,
      gender: self.gender.map(|g| g.to_string()),
      country_id: self.country_id,
      address: self.address.clone(),
      receive_newsletters: self.receive_newsletters,
      tax_id: None,
    }
  }
}

impl Validate for PersonAddRequest {
  fn validate(&self) -> Result<()> {
    validate_contact(self.name.as_deref(), self.email.as_deref())
  }
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Input to the person service's update operation. Every mutable field is
/// overwritten; `person_id` only selects the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonUpdateRequest {
  pub person_id:           Uuid,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<Gender>,
  pub country_id:          Option<Uuid>,
  pub address:             Option<String>,
  #[serde(default)]
  pub receive_newsletters: bool,
}

impl PersonUpdateRequest {
  /// Overwrite every mutable field of `person`. The identifier and tax id are
  /// left untouched.
  pub fn apply_to(&self, person: &mut Person) {
    person.name = self.name.clone();
    person.email = self.email.clone();
    person.date_of_birth = self.date_of_birth;
    person.gender = self.gender.map(|g| g.to_string());
    person.country_id = self.country_id;
    person.address = self.address.clone();
    person.receive_newsletters = self.receive_newsletters;
  }
}

impl Validate for PersonUpdateRequest {
  fn validate(&self) -> Result<()> {
    validate_contact(self.name.as_deref(), self.email.as_deref())
  }
}

/// Rules shared by add and update, checked in declaration order.
fn validate_contact(name: Option<&str>, email: Option<&str>) -> Result<()> {
  required(name, "Person Name Can't be Empty")?;
  let email = required(email, "Email Can't be Empty")?;
  email_address(email, "Enter a valid Mail")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn request() -> PersonAddRequest {
    PersonAddRequest {
      name: Some("Maged".into()),
      email: Some("maged@example.com".into()),
      date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17),
      gender: Some(Gender::Male),
      country_id: Some(Uuid::new_v4()),
      address: Some("12 Nile St".into()),
      receive_newsletters: true,
    }
  }

  #[test]
  fn gender_parses_case_insensitively() {
    assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
    assert_eq!("OTHER".parse::<Gender>().unwrap(), Gender::Other);
    assert!("unknown".parse::<Gender>().is_err());
    assert_eq!(Gender::Male.to_string(), "Male");
  }

  #[test]
  fn add_request_copies_every_field() {
    let req = request();
    let id = Uuid::new_v4();
    let person = req.to_person(id);
    assert_eq!(person.person_id, id);
    assert_eq!(person.name.as_deref(), Some("Maged"));
    assert_eq!(person.gender.as_deref(), Some("Male"));
    assert_eq!(person.country_id, req.country_id);
    assert!(person.receive_newsletters);
    assert!(person.tax_id.is_none());
  }

  #[test]
  fn missing_name_reports_name_rule_first() {
    let req = PersonAddRequest { name: None, email: None, ..request() };
    assert_eq!(
      req.validate(),
      Err(Error::Validation("Person Name Can't be Empty".into()))
    );
  }

  #[test]
  fn missing_email_is_rejected() {
    let req = PersonAddRequest { email: Some("   ".into()), ..request() };
    assert_eq!(
      req.validate(),
      Err(Error::Validation("Email Can't be Empty".into()))
    );
  }

  #[test]
  fn malformed_email_is_rejected() {
    let req = PersonAddRequest { email: Some("not-an-email".into()), ..request() };
    assert_eq!(
      req.validate(),
      Err(Error::Validation("Enter a valid Mail".into()))
    );
  }

  #[test]
  fn update_overwrites_mutable_fields_only() {
    let mut person = request().to_person(Uuid::new_v4());
    person.tax_id = Some("ab123456".into());
    let original_id = person.person_id;

    let update = PersonUpdateRequest {
      person_id:           Uuid::new_v4(),
      name:                Some("Mary".into()),
      email:               Some("mary@example.com".into()),
      date_of_birth:       None,
      gender:              Some(Gender::Female),
      country_id:          None,
      address:             None,
      receive_newsletters: false,
    };
    update.apply_to(&mut person);

    assert_eq!(person.person_id, original_id);
    assert_eq!(person.name.as_deref(), Some("Mary"));
    assert_eq!(person.gender.as_deref(), Some("Female"));
    assert!(person.date_of_birth.is_none());
    assert!(person.country_id.is_none());
    assert!(person.address.is_none());
    assert!(!person.receive_newsletters);
    assert_eq!(person.tax_id.as_deref(), Some("ab123456"));
  }
}
