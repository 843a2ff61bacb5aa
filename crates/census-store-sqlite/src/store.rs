//! [`SqliteStore`], the SQLite implementation of [`PersonStore`] and
//! [`CountryStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use census_core::{
  country::Country,
  filter::PersonFilter,
  person::Person,
  store::{CountryStore, PersonStore},
};

use crate::{
  encode::{encode_date, encode_uuid, RawCountry, RawPerson, PERSON_COLUMNS},
  schema::{DEFAULT_TAX_ID, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Census store backed by a single SQLite file.
///
/// Clones share one underlying connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_persons(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PERSON_COLUMNS} FROM persons"))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn add_person(&self, mut person: Person) -> Result<Person> {
    let tax_id = person
      .tax_id
      .get_or_insert_with(|| DEFAULT_TAX_ID.to_owned())
      .clone();

    let id_str      = encode_uuid(person.person_id);
    let name        = person.name.clone();
    let email       = person.email.clone();
    let dob_str     = person.date_of_birth.map(encode_date);
    let gender      = person.gender.clone();
    let country_str = person.country_id.map(encode_uuid);
    let address     = person.address.clone();
    let newsletters = person.receive_newsletters;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, name, email, date_of_birth, gender,
             country_id, address, receive_newsletters, tax_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id_str,
            name,
            email,
            dob_str,
            gender,
            country_str,
            address,
            newsletters,
            tax_id,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} FROM persons WHERE person_id = ?1"),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_persons(&self) -> Result<Vec<Person>> { self.select_persons().await }

  async fn filter_persons(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    // Date-of-birth matching needs the long month name, which SQLite cannot
    // format, so every field is matched in Rust after the read.
    let mut persons = self.select_persons().await?;
    persons.retain(|p| filter.matches(p));
    Ok(persons)
  }

  async fn update_person(&self, person: Person) -> Result<Option<Person>> {
    let id_str      = encode_uuid(person.person_id);
    let name        = person.name.clone();
    let email       = person.email.clone();
    let dob_str     = person.date_of_birth.map(encode_date);
    let gender      = person.gender.clone();
    let country_str = person.country_id.map(encode_uuid);
    let address     = person.address.clone();
    let newsletters = person.receive_newsletters;

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons SET
             name = ?2, email = ?3, date_of_birth = ?4, gender = ?5,
             country_id = ?6, address = ?7, receive_newsletters = ?8
           WHERE person_id = ?1",
          rusqlite::params![
            id_str,
            name,
            email,
            dob_str,
            gender,
            country_str,
            address,
            newsletters,
          ],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(person))
  }

  async fn delete_person(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM persons WHERE person_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }
}

// ─── CountryStore impl ───────────────────────────────────────────────────────

impl CountryStore for SqliteStore {
  type Error = Error;

  async fn add_country(&self, country: Country) -> Result<Country> {
    let id_str = encode_uuid(country.country_id);
    let name   = country.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (country_id, name) VALUES (?1, ?2)",
          rusqlite::params![id_str, name],
        )?;
        Ok(())
      })
      .await?;

    Ok(country)
  }

  async fn get_country(&self, id: Uuid) -> Result<Option<Country>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, name FROM countries WHERE country_id = ?1",
              rusqlite::params![id_str],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn get_country_by_name(&self, name: &str) -> Result<Option<Country>> {
    let name = name.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT country_id, name FROM countries WHERE name = ?1",
              rusqlite::params![name],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT country_id, name FROM countries")?;
        let rows = stmt
          .query_map([], RawCountry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }
}
