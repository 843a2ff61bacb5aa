//! The `PersonStore` and `CountryStore` traits.
//!
//! Implemented by storage backends (e.g. `census-store-sqlite`). The service
//! layer depends on these abstractions, not on any concrete backend. Each
//! call is its own unit of work; the traits promise nothing across calls.

use std::future::Future;

use uuid::Uuid;

use crate::{country::Country, filter::PersonFilter, person::Person};

// ─── Persons ─────────────────────────────────────────────────────────────────

/// The record store for persons.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new person exactly as given and return the stored record.
  fn add_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by UUID. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// List every stored person, in no particular order.
  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Return every stored person that satisfies `filter`.
  fn filter_persons<'a>(
    &'a self,
    filter: &'a PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Overwrite the mutable fields of the record with `person.person_id`.
  /// Returns `None` if no such record exists.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Remove a person. Returns `true` if a record was removed.
  fn delete_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Countries ───────────────────────────────────────────────────────────────

/// The reference-data store for countries. Countries are append-only.
pub trait CountryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new country exactly as given.
  fn add_country(
    &self,
    country: Country,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + '_;

  /// Retrieve a country by UUID. Returns `None` if not found.
  fn get_country(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + '_;

  /// Retrieve a country by exact, case-sensitive name.
  fn get_country_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  /// List every stored country, in no particular order.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;
}
