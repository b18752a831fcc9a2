//! Read-only reference data for form dropdowns, fetched with a fan-out/join.

use async_trait::async_trait;
use contracts::domain::common::{Driver, Product, Supplier, Warehouse};
use contracts::shared::envelope::{ListEnvelope, RecordEnvelope};
use serde::de::DeserializeOwned;

use crate::shared::http::{ApiClient, ApiError};

/// Lookup lists are small; ask for everything in one page.
const LOOKUP_QUERY: &str = "page=1&pageSize=1000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Products,
    Warehouses,
    Suppliers,
    Drivers,
}

impl LookupKind {
    pub fn path(&self) -> &'static str {
        match self {
            LookupKind::Products => "/products",
            LookupKind::Warehouses => "/warehouses",
            LookupKind::Suppliers => "/suppliers",
            LookupKind::Drivers => "/drivers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LookupKind::Products => "Товары",
            LookupKind::Warehouses => "Склады",
            LookupKind::Suppliers => "Поставщики",
            LookupKind::Drivers => "Водители",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lookups {
    pub products: Vec<Product>,
    pub warehouses: Vec<Warehouse>,
    pub suppliers: Vec<Supplier>,
    pub drivers: Vec<Driver>,
}

impl Lookups {
    /// `(id, name)` pairs for a select input.
    pub fn options(&self, kind: LookupKind) -> Vec<(i64, String)> {
        match kind {
            LookupKind::Products => self.products.iter().map(|p| (p.id, p.name.clone())).collect(),
            LookupKind::Warehouses => self.warehouses.iter().map(|w| (w.id, w.name.clone())).collect(),
            LookupKind::Suppliers => self.suppliers.iter().map(|s| (s.id, s.name.clone())).collect(),
            LookupKind::Drivers => self.drivers.iter().map(|d| (d.id, d.name.clone())).collect(),
        }
    }
}

#[async_trait(?Send)]
pub trait LookupSource {
    async fn fetch_all<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + 'static;

    async fn fetch_one<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static;
}

#[async_trait(?Send)]
impl LookupSource for ApiClient {
    async fn fetch_all<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        let envelope: ListEnvelope<T> = self.get_json(path, Some(LOOKUP_QUERY)).await?;
        Ok(envelope.into_page().records)
    }

    async fn fetch_one<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        let envelope: RecordEnvelope<T> = self.get_json(path, None).await?;
        Ok(envelope.into_inner())
    }
}

async fn fetch_if<L, T>(source: &L, kinds: &[LookupKind], kind: LookupKind) -> Result<Vec<T>, ApiError>
where
    L: LookupSource,
    T: DeserializeOwned + 'static,
{
    if kinds.contains(&kind) {
        source.fetch_all(kind.path()).await
    } else {
        Ok(Vec::new())
    }
}

/// Issues every requested lookup at once and waits for all of them.
///
/// Any failure yields a single [`ApiError::Lookups`] naming every lookup that
/// failed; partial results are dropped.
pub async fn load_lookups<L: LookupSource>(source: &L, kinds: &[LookupKind]) -> Result<Lookups, ApiError> {
    let (products, warehouses, suppliers, drivers) = futures::join!(
        fetch_if::<_, Product>(source, kinds, LookupKind::Products),
        fetch_if::<_, Warehouse>(source, kinds, LookupKind::Warehouses),
        fetch_if::<_, Supplier>(source, kinds, LookupKind::Suppliers),
        fetch_if::<_, Driver>(source, kinds, LookupKind::Drivers),
    );

    let mut failed = Vec::new();
    for (kind, error) in [
        (LookupKind::Products, products.as_ref().err()),
        (LookupKind::Warehouses, warehouses.as_ref().err()),
        (LookupKind::Suppliers, suppliers.as_ref().err()),
        (LookupKind::Drivers, drivers.as_ref().err()),
    ] {
        if let Some(error) = error {
            log::warn!("lookup {} failed: {}", kind.path(), error);
            failed.push(kind.label().to_string());
        }
    }
    if !failed.is_empty() {
        return Err(ApiError::Lookups(failed));
    }

    Ok(Lookups {
        products: products.unwrap_or_default(),
        warehouses: warehouses.unwrap_or_default(),
        suppliers: suppliers.unwrap_or_default(),
        drivers: drivers.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::testing::MockApi;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_loads_only_requested_kinds() {
        let api = MockApi::new(Vec::new());
        api.set_lookup("/products", Ok(json!([{ "id": 1, "name": "Cocoa" }])));
        api.set_lookup(
            "/warehouses",
            Ok(json!({ "data": [{ "id": 4, "name": "North" }], "pagination": { "total": 1, "page": 1, "pageSize": 1000 } })),
        );

        let lookups = block_on(load_lookups(&api, &[LookupKind::Products, LookupKind::Warehouses])).unwrap();
        assert_eq!(lookups.products[0].name, "Cocoa");
        assert_eq!(lookups.options(LookupKind::Warehouses), vec![(4, "North".to_string())]);
        assert!(lookups.drivers.is_empty());
        assert_eq!(api.lookup_calls(), vec!["/products", "/warehouses"]);
    }

    #[test]
    fn test_failures_are_aggregated() {
        let api = MockApi::new(Vec::new());
        api.set_lookup("/products", Ok(json!([])));
        api.set_lookup("/suppliers", Err(ApiError::Timeout));
        api.set_lookup("/drivers", Err(ApiError::Network("down".into())));

        let err = block_on(load_lookups(
            &api,
            &[LookupKind::Products, LookupKind::Suppliers, LookupKind::Drivers],
        ))
        .unwrap_err();
        assert_eq!(err, ApiError::Lookups(vec!["Поставщики".into(), "Водители".into()]));
    }
}
