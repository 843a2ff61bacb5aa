//! Country directory and person query/update services for Census.
//!
//! Both services are generic over the [`census_core::store`] traits and hold
//! no state beyond their collaborator handles. Transport and presentation are
//! the caller's responsibility.
//!
//! ```rust,ignore
//! let store = Arc::new(SqliteStore::open("census.db").await?);
//! let persons = PersonService::new(store.clone(), store.clone());
//! let view = persons.add_person(Some(request)).await?;
//! ```

pub mod clock;
pub mod countries;
pub mod error;
pub mod persons;

pub use clock::{Clock, FixedClock, SystemClock};
pub use countries::CountriesService;
pub use error::{ServiceError, ServiceResult};
pub use persons::PersonService;
