//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, dates as `YYYY-MM-DD`,
//! booleans as `0`/`1`.

use census_core::{country::Country, person::Person};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `persons` read, in [`RawPerson`] field order.
pub const PERSON_COLUMNS: &str = "person_id, name, email, date_of_birth, gender, \
                                  country_id, address, receive_newsletters, tax_id";

/// Raw values read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:           String,
  pub name:                Option<String>,
  pub email:               Option<String>,
  pub date_of_birth:       Option<String>,
  pub gender:              Option<String>,
  pub country_id:          Option<String>,
  pub address:             Option<String>,
  pub receive_newsletters: bool,
  pub tax_id:              Option<String>,
}

impl RawPerson {
  /// Map a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:           row.get(0)?,
      name:                row.get(1)?,
      email:               row.get(2)?,
      date_of_birth:       row.get(3)?,
      gender:              row.get(4)?,
      country_id:          row.get(5)?,
      address:             row.get(6)?,
      receive_newsletters: row.get(7)?,
      tax_id:              row.get(8)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:           decode_uuid(&self.person_id)?,
      name:                self.name,
      email:               self.email,
      date_of_birth:       self.date_of_birth.as_deref().map(decode_date).transpose()?,
      gender:              self.gender,
      country_id:          self.country_id.as_deref().map(decode_uuid).transpose()?,
      address:             self.address,
      receive_newsletters: self.receive_newsletters,
      tax_id:              self.tax_id,
    })
  }
}

/// Raw values read directly from a `countries` row.
pub struct RawCountry {
  pub country_id: String,
  pub name:       String,
}

impl RawCountry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { country_id: row.get(0)?, name: row.get(1)? })
  }

  pub fn into_country(self) -> Result<Country> {
    Ok(Country { country_id: decode_uuid(&self.country_id)?, name: self.name })
  }
}
