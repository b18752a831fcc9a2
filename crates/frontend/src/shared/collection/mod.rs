//! Generic remote collection controller.
//!
//! Every management page (purchases, deliveries, disposals, productions,
//! stock movements, users) is one instantiation of this module over an
//! entity type: query state, fetch coordination, local transform pipeline,
//! optimistic mutations and the form bridge live here once.

pub mod api;
pub mod controller;
pub mod entity;
pub mod fetch;
pub mod form_bridge;
pub mod lookups;
pub mod mutation;
pub mod page;
pub mod query;
pub mod state;
pub mod transform;
pub mod view;

pub use api::{CollectionApi, RestCollection};
pub use controller::CollectionController;
pub use entity::CollectionEntity;
pub use form_bridge::{FieldKind, FieldReader, FieldSpec, FormBridge, FormDraft, FormModel, ValidationErrors};
pub use lookups::{LookupKind, LookupSource, Lookups};
pub use query::{FilterValue, ListQuery, SortDirection, SortSpec};
pub use state::{ErrorPolicy, ListState, StateCell};
pub use view::{Column, FilterSpec, ListView};

#[cfg(test)]
pub(crate) mod testing;
