//! The person query/update service.
//!
//! Orchestrates validation, filtering, sorting, and update-merge over the
//! person record store, and shapes stored records into [`PersonView`]s. The
//! country name on each view is resolved through the country store at read
//! time; a dangling reference yields `None`, never an error.

use std::{collections::HashMap, sync::Arc};

use census_core::{
  filter::{PersonFilter, SearchField},
  person::{Person, PersonAddRequest, PersonUpdateRequest},
  sort::{SortField, SortOrder, sort_persons},
  store::{CountryStore, PersonStore},
  validate::Validate,
  view::PersonView,
};
use uuid::Uuid;

use crate::{
  clock::{Clock, SystemClock},
  error::{ServiceError, ServiceResult, store_error},
};

/// Person operations over a [`PersonStore`] `P`, resolving country names
/// through a [`CountryStore`] `C`.
pub struct PersonService<P, C> {
  persons:   Arc<P>,
  countries: Arc<C>,
  clock:     Arc<dyn Clock>,
}

impl<P, C> Clone for PersonService<P, C> {
  fn clone(&self) -> Self {
    Self {
      persons:   Arc::clone(&self.persons),
      countries: Arc::clone(&self.countries),
      clock:     Arc::clone(&self.clock),
    }
  }
}

impl<P, C> PersonService<P, C>
where
  P: PersonStore,
  C: CountryStore,
{
  pub fn new(persons: Arc<P>, countries: Arc<C>) -> Self {
    Self { persons, countries, clock: Arc::new(SystemClock) }
  }

  /// Replace the time source used for age computation.
  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Arc::new(clock);
    self
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Validate and persist a new person under a freshly generated id.
  #[tracing::instrument(skip(self))]
  pub async fn add_person(
    &self,
    request: Option<PersonAddRequest>,
  ) -> ServiceResult<PersonView> {
    let request = request.ok_or(ServiceError::NullInput("person add request"))?;
    request.validate()?;

    let person = request.to_person(Uuid::new_v4());
    let stored = self.persons.add_person(person).await.map_err(store_error)?;
    tracing::info!(person_id = %stored.person_id, "person added");

    self.view_one(stored).await
  }

  /// Overwrite every mutable field of an existing person.
  ///
  /// Unlike [`Self::get_person_by_id`], a missing person is an error here.
  #[tracing::instrument(skip(self))]
  pub async fn update_person(
    &self,
    request: Option<PersonUpdateRequest>,
  ) -> ServiceResult<PersonView> {
    let request = request.ok_or(ServiceError::NullInput("person update request"))?;
    request.validate()?;

    let mut person = self
      .persons
      .get_person(request.person_id)
      .await
      .map_err(store_error)?
      .ok_or(ServiceError::NotFound(request.person_id))?;

    request.apply_to(&mut person);

    let stored = self
      .persons
      .update_person(person)
      .await
      .map_err(store_error)?
      .ok_or(ServiceError::NotFound(request.person_id))?;
    tracing::info!(person_id = %stored.person_id, "person updated");

    self.view_one(stored).await
  }

  /// Remove a person. Returns `false` when `id` is absent or unknown.
  #[tracing::instrument(skip(self))]
  pub async fn delete_person(&self, id: Option<Uuid>) -> ServiceResult<bool> {
    let Some(id) = id else { return Ok(false) };
    let removed = self.persons.delete_person(id).await.map_err(store_error)?;
    if removed {
      tracing::info!(person_id = %id, "person deleted");
    }
    Ok(removed)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Look up a person; an absent id or unknown person yields `None`.
  #[tracing::instrument(skip(self))]
  pub async fn get_person_by_id(
    &self,
    id: Option<Uuid>,
  ) -> ServiceResult<Option<PersonView>> {
    let Some(id) = id else { return Ok(None) };
    match self.persons.get_person(id).await.map_err(store_error)? {
      Some(person) => Ok(Some(self.view_one(person).await?)),
      None => Ok(None),
    }
  }

  #[tracing::instrument(skip(self))]
  pub async fn get_all_persons(&self) -> ServiceResult<Vec<PersonView>> {
    let persons = self.persons.list_persons().await.map_err(store_error)?;
    tracing::info!(count = persons.len(), "listing persons");
    self.view_many(persons).await
  }

  /// Persons whose `field` matches `text`.
  ///
  /// An absent field or an absent or empty text returns every person.
  #[tracing::instrument(skip(self))]
  pub async fn get_filtered_persons(
    &self,
    field: Option<SearchField>,
    text: Option<&str>,
  ) -> ServiceResult<Vec<PersonView>> {
    let (Some(field), Some(text)) = (field, text.filter(|t| !t.is_empty())) else {
      return self.get_all_persons().await;
    };

    let filter = PersonFilter::new(field, text);
    let persons = self
      .persons
      .filter_persons(&filter)
      .await
      .map_err(store_error)?;
    tracing::info!(%field, count = persons.len(), "filtered persons");
    self.view_many(persons).await
  }

  /// Order `persons` by `field`; an absent field returns the input as is.
  /// Equal keys keep their input order.
  #[tracing::instrument(skip(self, persons), fields(count = persons.len()))]
  pub fn get_sorted_persons(
    &self,
    persons: Vec<PersonView>,
    field: Option<SortField>,
    order: SortOrder,
  ) -> Vec<PersonView> {
    match field {
      Some(field) => sort_persons(persons, field, order),
      None => persons,
    }
  }

  // ── View shaping ──────────────────────────────────────────────────────────

  async fn view_one(&self, person: Person) -> ServiceResult<PersonView> {
    let country_name = match person.country_id {
      Some(id) => self
        .countries
        .get_country(id)
        .await
        .map_err(store_error)?
        .map(|c| c.name),
      None => None,
    };
    Ok(PersonView::build(person, country_name, self.clock.now()))
  }

  async fn view_many(&self, persons: Vec<Person>) -> ServiceResult<Vec<PersonView>> {
    let names: HashMap<Uuid, String> = self
      .countries
      .list_countries()
      .await
      .map_err(store_error)?
      .into_iter()
      .map(|c| (c.country_id, c.name))
      .collect();

    let now = self.clock.now();
    Ok(
      persons
        .into_iter()
        .map(|p| {
          let country_name = p.country_id.and_then(|id| names.get(&id).cloned());
          PersonView::build(p, country_name, now)
        })
        .collect(),
    )
  }
}
