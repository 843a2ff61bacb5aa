//! SQL schema for the Census SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Tax identifier written when a person is inserted without one.
pub const DEFAULT_TAX_ID: &str = "abc12345";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The length CHECKs mirror `census_core::person::MAX_*_LEN`,
/// `TAX_ID_LEN`, and `census_core::country::MAX_COUNTRY_NAME_LEN`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS countries (
    country_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    CHECK (length(name) <= 20)
);

-- country_id is a weak reference: no foreign key, no cascade.
CREATE TABLE IF NOT EXISTS persons (
    person_id           TEXT PRIMARY KEY,
    name                TEXT,
    email               TEXT,
    date_of_birth       TEXT,              -- YYYY-MM-DD
    gender              TEXT,
    country_id          TEXT,
    address             TEXT,
    receive_newsletters INTEGER NOT NULL DEFAULT 0,
    tax_id              TEXT DEFAULT 'abc12345',
    CHECK (length(name) <= 50),
    CHECK (length(email) <= 50),
    CHECK (length(gender) <= 10),
    CHECK (length(address) <= 100),
    CONSTRAINT CHK_TIN CHECK (length(tax_id) = 8)
);

CREATE UNIQUE INDEX IF NOT EXISTS countries_name_idx ON countries(name);

PRAGMA user_version = 1;
";
