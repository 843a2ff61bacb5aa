//! Read models returned to callers.
//!
//! Views are immutable projections built at read time. Equality is
//! structural over every visible field.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  country::Country,
  person::{Gender, Person, PersonUpdateRequest},
};

/// Average number of days in a year, leap years included.
const DAYS_PER_YEAR: f64 = 365.25;

// ─── CountryView ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryView {
  pub country_id: Uuid,
  pub name:       String,
}

impl From<Country> for CountryView {
  fn from(c: Country) -> Self {
    Self { country_id: c.country_id, name: c.name }
  }
}

// ─── PersonView ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
  pub person_id:           Uuid,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<NaiveDate>,
  pub gender:              Option<String>,
  pub country_id:          Option<Uuid>,
  /// Resolved from `country_id` when the view was built; `None` if the
  /// reference is absent or dangling.
  pub country_name:        Option<String>,
  pub address:             Option<String>,
  pub receive_newsletters: bool,
  /// Whole years since `date_of_birth`, relative to the build time.
  pub age:                 Option<i64>,
}

impl PersonView {
  /// Project a stored person into a view as of `now`.
  pub fn build(
    person: Person,
    country_name: Option<String>,
    now: DateTime<Utc>,
  ) -> Self {
    Self {
      person_id: person.person_id,
      age: person.date_of_birth.map(|dob| age_in_years(dob, now)),
      name: person.name,
      email: person.email,
      date_of_birth: person.date_of_birth,
      gender: person.gender,
      country_id: person.country_id,
      country_name,
      address: person.address,
      receive_newsletters: person.receive_newsletters,
    }
  }

  /// Pre-fill an update request from this view, e.g. for an edit form.
  ///
  /// A stored gender that no longer parses is dropped.
  pub fn to_update_request(&self) -> PersonUpdateRequest {
    PersonUpdateRequest {
      person_id:           self.person_id,
      name:                self.name.clone(),
      email:               self.email.clone(),
      date_of_birth:       self.date_of_birth,
      gender:              self
        .gender
        .as_deref()
        .and_then(|g| g.parse::<Gender>().ok()),
      country_id:          self.country_id,
      address:             self.address.clone(),
      receive_newsletters: self.receive_newsletters,
    }
  }
}

/// Days elapsed since midnight UTC on `dob`, divided by 365.25 and rounded
/// half to even.
pub fn age_in_years(dob: NaiveDate, now: DateTime<Utc>) -> i64 {
  let born = dob.and_time(NaiveTime::MIN).and_utc();
  let days = (now - born).num_milliseconds() as f64 / 86_400_000.0;
  (days / DAYS_PER_YEAR).round_ties_even() as i64
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
  }

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn age_rounds_to_nearest_year() {
    assert_eq!(age_in_years(date(2000, 1, 1), at(2020, 1, 1)), 20);
    // Seven months past a birthday rounds up.
    assert_eq!(age_in_years(date(2000, 1, 1), at(2020, 8, 1)), 21);
    // Four months past rounds down.
    assert_eq!(age_in_years(date(2000, 1, 1), at(2020, 5, 1)), 20);
  }

  #[test]
  fn age_is_zero_on_birth_day() {
    assert_eq!(age_in_years(date(2024, 3, 9), at(2024, 3, 9)), 0);
  }

  #[test]
  fn view_without_birth_date_has_no_age() {
    let person = Person {
      person_id:           Uuid::new_v4(),
      name:                Some("Sayed".into()),
      email:               Some("sayed@example.com".into()),
      date_of_birth:       None,
      gender:              None,
      country_id:          None,
      address:             None,
      receive_newsletters: false,
      tax_id:              None,
    };
    let view = PersonView::build(person, None, at(2024, 1, 1));
    assert_eq!(view.age, None);
    assert_eq!(view.country_name, None);
  }

  #[test]
  fn update_request_round_trips_gender() {
    let person = Person {
      person_id:           Uuid::new_v4(),
      name:                Some("Mary".into()),
      email:               Some("mary@example.com".into()),
      date_of_birth:       Some(date(1995, 2, 14)),
      gender:              Some("female".into()),
      country_id:          Some(Uuid::new_v4()),
      address:             Some("Cairo".into()),
      receive_newsletters: true,
      tax_id:              None,
    };
    let view = PersonView::build(person.clone(), Some("Egypt".into()), at(2024, 1, 1));
    let req = view.to_update_request();
    assert_eq!(req.person_id, person.person_id);
    assert_eq!(req.gender, Some(Gender::Female));
    assert_eq!(req.country_id, person.country_id);
    assert!(req.receive_newsletters);
  }

  #[test]
  fn unknown_stored_gender_is_dropped() {
    let person = Person {
      person_id:           Uuid::new_v4(),
      name:                None,
      email:               None,
      date_of_birth:       None,
      gender:              Some("n/a".into()),
      country_id:          None,
      address:             None,
      receive_newsletters: false,
      tax_id:              None,
    };
    let view = PersonView::build(person, None, at(2024, 1, 1));
    assert_eq!(view.to_update_request().gender, None);
  }
}
