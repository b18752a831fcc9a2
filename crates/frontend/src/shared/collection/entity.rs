use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::list_utils::{Searchable, Sortable};

/// A server-managed record type the collection controller can list and mutate.
pub trait CollectionEntity:
    Clone + PartialEq + Searchable + Sortable + DeserializeOwned + Send + Sync + 'static
{
    /// Endpoint base path, e.g. `/purchases`
    const PATH: &'static str;

    /// Whether the endpoint supports `POST {PATH}/{id}/restore`
    const SOFT_DELETE: bool = false;

    type Create: Serialize + Clone + 'static;
    type Update: Serialize + Clone + 'static;

    fn id(&self) -> i64;

    fn deleted_at(&self) -> Option<&str> {
        None
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}
