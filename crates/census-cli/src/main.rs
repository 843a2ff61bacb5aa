//! `census`: command-line front end for the Census record store.
//!
//! # Usage
//!
//! ```text
//! census country add Egypt
//! census person add --name Maged --email maged@example.com --gender Male
//! census person list --search-by PersonName --search ma --sort-by Age --order desc
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

mod commands;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use census_service::{CountriesService, PersonService};
use census_store_sqlite::SqliteStore;
use clap::Parser;
use commands::{Command, Services};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Census person and country records")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "census.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let store = SqliteStore::open(&settings.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", settings.store_path))?;
  let store = Arc::new(store);

  let services = Services {
    countries: CountriesService::new(store.clone()),
    persons:   PersonService::new(store.clone(), store),
  };

  commands::run(cli.command, &services).await
}

#[cfg(test)]
mod tests {
  use census_core::{person::Gender, sort::SortOrder};
  use clap::CommandFactory as _;

  use super::*;
  use crate::commands::{CountryCommand, PersonCommand};

  #[test]
  fn cli_definition_is_consistent() { Cli::command().debug_assert(); }

  #[test]
  fn parses_person_add() {
    let cli = Cli::try_parse_from([
      "census", "person", "add", "--name", "Maged", "--email", "m@example.com",
      "--dob", "1990-05-17", "--gender", "male", "--newsletters",
    ])
    .unwrap();
    let Command::Person(PersonCommand::Add(fields)) = cli.command else {
      panic!("wrong command: {:?}", cli.command);
    };
    assert_eq!(fields.name.as_deref(), Some("Maged"));
    assert_eq!(fields.gender, Some(Gender::Male));
    assert!(fields.newsletters);
    assert!(fields.country_id.is_none());
  }

  #[test]
  fn person_list_defaults_to_name_ascending() {
    let cli = Cli::try_parse_from(["census", "person", "list"]).unwrap();
    let Command::Person(PersonCommand::List { search_by, sort_by, order, .. }) = cli.command
    else {
      panic!("wrong command");
    };
    assert!(search_by.is_none());
    assert_eq!(sort_by, "PersonName");
    assert_eq!(order, SortOrder::Asc);
  }

  #[test]
  fn rejects_malformed_ids() {
    assert!(Cli::try_parse_from(["census", "country", "get", "not-a-uuid"]).is_err());
    assert!(matches!(
      Cli::try_parse_from(["census", "country", "list"]).unwrap().command,
      Command::Country(CountryCommand::List)
    ));
  }
}
