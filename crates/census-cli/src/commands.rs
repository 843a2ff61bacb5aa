//! Subcommands and their dispatch onto the services.

use std::path::PathBuf;

use anyhow::Context as _;
use census_core::{
  filter::SearchField,
  person::{Gender, PersonAddRequest, PersonUpdateRequest},
  sort::{SortField, SortOrder},
};
use census_service::{CountriesService, PersonService};
use census_store_sqlite::SqliteStore;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use uuid::Uuid;

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Manage country reference data.
  #[command(subcommand)]
  Country(CountryCommand),
  /// Manage person records.
  #[command(subcommand)]
  Person(PersonCommand),
}

#[derive(Subcommand, Debug)]
pub enum CountryCommand {
  /// Add a country; names are unique and case-sensitive.
  Add { name: String },
  /// List every country.
  List,
  /// Show one country.
  Get { id: Uuid },
  /// Add every new name from a JSON array of strings.
  Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum PersonCommand {
  /// Add a person.
  Add(PersonFields),
  /// Show one person.
  Get { id: Uuid },
  /// List persons, optionally filtered and sorted.
  List {
    /// PersonName, Email, Address, Gender or DateOfBirth; anything else
    /// disables filtering.
    #[arg(long)]
    search_by: Option<String>,
    #[arg(long)]
    search:    Option<String>,
    /// Column to order by; an unknown column leaves the order unchanged.
    #[arg(long, default_value = "PersonName")]
    sort_by:   String,
    #[arg(long, default_value = "asc")]
    order:     SortOrder,
  },
  /// Overwrite every field of an existing person.
  Update {
    id: Uuid,
    #[command(flatten)]
    fields: PersonFields,
  },
  /// Delete a person.
  Delete { id: Uuid },
}

/// Person fields shared by `add` and `update`.
#[derive(Args, Debug)]
pub struct PersonFields {
  #[arg(long)]
  pub name:        Option<String>,
  #[arg(long)]
  pub email:       Option<String>,
  /// Date of birth as YYYY-MM-DD.
  #[arg(long)]
  pub dob:         Option<NaiveDate>,
  /// Male, Female or Other.
  #[arg(long)]
  pub gender:      Option<Gender>,
  #[arg(long)]
  pub country_id:  Option<Uuid>,
  #[arg(long)]
  pub address:     Option<String>,
  #[arg(long)]
  pub newsletters: bool,
}

impl PersonFields {
  fn into_add_request(self) -> PersonAddRequest {
    PersonAddRequest {
      name:                self.name,
      email:               self.email,
      date_of_birth:       self.dob,
      gender:              self.gender,
      country_id:          self.country_id,
      address:             self.address,
      receive_newsletters: self.newsletters,
    }
  }

  fn into_update_request(self, person_id: Uuid) -> PersonUpdateRequest {
    PersonUpdateRequest {
      person_id,
      name: self.name,
      email: self.email,
      date_of_birth: self.dob,
      gender: self.gender,
      country_id: self.country_id,
      address: self.address,
      receive_newsletters: self.newsletters,
    }
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// Services wired to one store.
pub struct Services {
  pub countries: CountriesService<SqliteStore>,
  pub persons:   PersonService<SqliteStore, SqliteStore>,
}

pub async fn run(command: Command, services: &Services) -> anyhow::Result<()> {
  match command {
    Command::Country(cmd) => run_country(cmd, &services.countries).await,
    Command::Person(cmd) => run_person(cmd, &services.persons).await,
  }
}

async fn run_country(
  cmd: CountryCommand,
  countries: &CountriesService<SqliteStore>,
) -> anyhow::Result<()> {
  use census_core::country::CountryAddRequest;

  match cmd {
    CountryCommand::Add { name } => {
      print_json(&countries.add_country(Some(CountryAddRequest::new(name))).await?)
    }
    CountryCommand::List => print_json(&countries.get_all_countries().await?),
    CountryCommand::Get { id } => print_json(&countries.get_country_by_id(Some(id)).await?),
    CountryCommand::Import { file } => {
      let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
      let names: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as a JSON array of names", file.display()))?;
      let inserted = countries.import_countries(names).await?;
      print_json(&serde_json::json!({ "inserted": inserted }))
    }
  }
}

async fn run_person(
  cmd: PersonCommand,
  persons: &PersonService<SqliteStore, SqliteStore>,
) -> anyhow::Result<()> {
  match cmd {
    PersonCommand::Add(fields) => {
      print_json(&persons.add_person(Some(fields.into_add_request())).await?)
    }
    PersonCommand::Get { id } => print_json(&persons.get_person_by_id(Some(id)).await?),
    PersonCommand::List { search_by, search, sort_by, order } => {
      let field = search_by.as_deref().and_then(SearchField::parse);
      let found = persons.get_filtered_persons(field, search.as_deref()).await?;
      let sorted = persons.get_sorted_persons(found, SortField::parse(&sort_by), order);
      print_json(&sorted)
    }
    PersonCommand::Update { id, fields } => print_json(
      &persons
        .update_person(Some(fields.into_update_request(id)))
        .await?,
    ),
    PersonCommand::Delete { id } => {
      let deleted = persons.delete_person(Some(id)).await?;
      print_json(&serde_json::json!({ "deleted": deleted }))
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let out = serde_json::to_string_pretty(value).context("serialising output")?;
  println!("{out}");
  Ok(())
}
