//! The country directory: adds and looks up country reference data.

use std::sync::Arc;

use census_core::{
  country::CountryAddRequest,
  store::CountryStore,
  view::CountryView,
};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult, store_error};

/// Country reference data over any [`CountryStore`].
pub struct CountriesService<C> {
  store: Arc<C>,
}

impl<C> Clone for CountriesService<C> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<C: CountryStore> CountriesService<C> {
  pub fn new(store: Arc<C>) -> Self { Self { store } }

  /// Add a country under a freshly generated id.
  ///
  /// Fails with [`ServiceError::NullInput`] when `request` is absent,
  /// [`ServiceError::InvalidInput`] when the name is absent or empty, and
  /// [`ServiceError::DuplicateName`] when a country with exactly the same
  /// name (case-sensitive) already exists.
  #[tracing::instrument(skip(self))]
  pub async fn add_country(
    &self,
    request: Option<CountryAddRequest>,
  ) -> ServiceResult<CountryView> {
    let request = request.ok_or(ServiceError::NullInput("country add request"))?;
    let country = request.to_country(Uuid::new_v4()).ok_or_else(|| {
      ServiceError::InvalidInput("country name must not be empty".into())
    })?;

    if self
      .store
      .get_country_by_name(&country.name)
      .await
      .map_err(store_error)?
      .is_some()
    {
      return Err(ServiceError::DuplicateName(country.name));
    }

    let stored = self.store.add_country(country).await.map_err(store_error)?;
    tracing::info!(country_id = %stored.country_id, "country added");
    Ok(stored.into())
  }

  /// Every known country, in store order.
  #[tracing::instrument(skip(self))]
  pub async fn get_all_countries(&self) -> ServiceResult<Vec<CountryView>> {
    let countries = self.store.list_countries().await.map_err(store_error)?;
    Ok(countries.into_iter().map(CountryView::from).collect())
  }

  /// Look up a country; an absent id or unknown country yields `None`.
  #[tracing::instrument(skip(self))]
  pub async fn get_country_by_id(
    &self,
    id: Option<Uuid>,
  ) -> ServiceResult<Option<CountryView>> {
    let Some(id) = id else { return Ok(None) };
    let country = self.store.get_country(id).await.map_err(store_error)?;
    Ok(country.map(CountryView::from))
  }

  /// Look up a country by exact name; an absent name or unknown country
  /// yields `None`.
  #[tracing::instrument(skip(self))]
  pub async fn get_country_by_name(
    &self,
    name: Option<&str>,
  ) -> ServiceResult<Option<CountryView>> {
    let Some(name) = name else { return Ok(None) };
    let country = self
      .store
      .get_country_by_name(name)
      .await
      .map_err(store_error)?;
    Ok(country.map(CountryView::from))
  }

  /// Add every name that is non-empty and not yet present. Returns how many
  /// countries were inserted.
  #[tracing::instrument(skip(self, names))]
  pub async fn import_countries<I>(&self, names: I) -> ServiceResult<usize>
  where
    I: IntoIterator<Item = String>,
  {
    let mut inserted = 0;
    for name in names {
      if name.is_empty() {
        continue;
      }
      match self.add_country(Some(CountryAddRequest::new(name))).await {
        Ok(_) => inserted += 1,
        Err(ServiceError::DuplicateName(name)) => {
          tracing::debug!(%name, "skipping existing country");
        }
        Err(e) => return Err(e),
      }
    }
    tracing::info!(inserted, "countries imported");
    Ok(inserted)
  }
}
