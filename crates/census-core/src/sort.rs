//! Sort dispatch over person views.
//!
//! Every [`SortField`] maps to one key projection. Sorting is
//! stable in both directions: views with equal keys keep their input order.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::view::PersonView;

/// A person view column that supports ordering.
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
pub enum SortField {
  PersonName,
  Email,
  Gender,
  Age,
  DateOfBirth,
  CountryName,
  Address,
  ReceiveNewsLetters,
}

impl SortField {
  /// Resolve a field name; unknown names yield `None`.
  pub fn parse(name: &str) -> Option<Self> { name.parse().ok() }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SortOrder {
  #[default]
  Asc,
  Desc,
}

/// Order `persons` by `field` in `order`.
///
/// Each view's key is computed once.
pub fn sort_persons(
  mut persons: Vec<PersonView>,
  field: SortField,
  order: SortOrder,
) -> Vec<PersonView> {
  match order {
    SortOrder::Asc => persons.sort_by_cached_key(|v| sort_key(field, v)),
    SortOrder::Desc => persons.sort_by_cached_key(|v| Reverse(sort_key(field, v))),
  }
  persons
}

/// A comparable projection of one column. Absent values order first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
  /// Uppercased, so text compares ordinally without regard to case.
  Text(Option<String>),
  Number(Option<i64>),
  Date(Option<NaiveDate>),
  Flag(bool),
}

fn sort_key(field: SortField, v: &PersonView) -> SortKey {
  match field {
    SortField::PersonName => text_key(&v.name),
    SortField::Email => text_key(&v.email),
    SortField::Gender => text_key(&v.gender),
    SortField::Age => SortKey::Number(v.age),
    SortField::DateOfBirth => SortKey::Date(v.date_of_birth),
    SortField::CountryName => text_key(&v.country_name),
    SortField::Address => text_key(&v.address),
    SortField::ReceiveNewsLetters => SortKey::Flag(v.receive_newsletters),
  }
}

fn text_key(value: &Option<String>) -> SortKey {
  SortKey::Text(value.as_deref().map(str::to_uppercase))
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;

  fn view(name: &str, age: Option<i64>, newsletters: bool) -> PersonView {
    PersonView {
      person_id:           Uuid::new_v4(),
      name:                Some(name.into()),
      email:               Some(format!("{}@example.com", name.to_lowercase())),
      date_of_birth:       None,
      gender:              None,
      country_id:          None,
      country_name:        None,
      address:             None,
      receive_newsletters: newsletters,
      age,
    }
  }

  fn names(views: &[PersonView]) -> Vec<&str> {
    views.iter().filter_map(|v| v.name.as_deref()).collect()
  }

  #[test]
  fn name_descending_ignores_case() {
    let input = vec![
      view("maged", None, false),
      view("Sayed", None, false),
      view("Mary", None, false),
      view("ahmed", None, false),
    ];
    let sorted = sort_persons(input, SortField::PersonName, SortOrder::Desc);
    assert_eq!(names(&sorted), ["Sayed", "Mary", "maged", "ahmed"]);
    for pair in sorted.windows(2) {
      let a = pair[0].name.as_deref().unwrap().to_uppercase();
      let b = pair[1].name.as_deref().unwrap().to_uppercase();
      assert!(a >= b);
    }
  }

  #[test]
  fn equal_keys_keep_input_order_both_ways() {
    let input = vec![
      view("A", Some(30), true),
      view("B", Some(20), false),
      view("C", Some(30), false),
      view("D", Some(20), true),
    ];
    let asc = sort_persons(input.clone(), SortField::Age, SortOrder::Asc);
    assert_eq!(names(&asc), ["B", "D", "A", "C"]);
    let desc = sort_persons(input.clone(), SortField::Age, SortOrder::Desc);
    assert_eq!(names(&desc), ["A", "C", "B", "D"]);
    let flags =
      sort_persons(input, SortField::ReceiveNewsLetters, SortOrder::Asc);
    assert_eq!(names(&flags), ["B", "C", "A", "D"]);
  }

  #[test]
  fn absent_values_sort_first_ascending() {
    let mut dated = view("Dated", Some(33), false);
    dated.date_of_birth = NaiveDate::from_ymd_opt(1991, 1, 1);
    let undated = view("Undated", None, false);
    let sorted = sort_persons(
      vec![dated, undated],
      SortField::DateOfBirth,
      SortOrder::Asc,
    );
    assert_eq!(names(&sorted), ["Undated", "Dated"]);
  }

  #[test]
  fn text_columns_sort_case_insensitively() {
    let mut a = view("A", None, false);
    a.email = Some("zed@example.com".into());
    a.gender = Some("male".into());
    a.address = Some("b street".into());
    let mut b = view("B", None, false);
    b.email = Some("Amy@example.com".into());
    b.gender = Some("Female".into());
    b.address = None;
    let mut c = view("C", None, false);
    c.email = Some("mia@example.com".into());
    c.gender = Some("MALE".into());
    c.address = Some("A Street".into());
    let input = vec![a, b, c];

    let by_email = sort_persons(input.clone(), SortField::Email, SortOrder::Asc);
    assert_eq!(names(&by_email), ["B", "C", "A"]);

    // "male" and "MALE" tie and keep their input order.
    let by_gender = sort_persons(input.clone(), SortField::Gender, SortOrder::Asc);
    assert_eq!(names(&by_gender), ["B", "A", "C"]);
    let by_gender = sort_persons(input.clone(), SortField::Gender, SortOrder::Desc);
    assert_eq!(names(&by_gender), ["A", "C", "B"]);

    let by_address = sort_persons(input.clone(), SortField::Address, SortOrder::Asc);
    assert_eq!(names(&by_address), ["B", "C", "A"]);
    let by_address = sort_persons(input, SortField::Address, SortOrder::Desc);
    assert_eq!(names(&by_address), ["A", "C", "B"]);
  }

  #[test]
  fn parse_fields_and_orders() {
    assert_eq!(SortField::parse("CountryName"), Some(SortField::CountryName));
    assert_eq!(SortField::parse("Nickname"), None);
    assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
    assert_eq!("ASC".parse::<SortOrder>().unwrap(), SortOrder::Asc);
  }
}
