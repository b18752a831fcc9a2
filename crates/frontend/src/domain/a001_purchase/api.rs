use contracts::domain::a001_purchase::aggregate::{CreatePurchaseDto, Purchase, UpdatePurchaseDto};

use crate::shared::collection::CollectionEntity;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};

impl CollectionEntity for Purchase {
    const PATH: &'static str = "/purchases";
    const SOFT_DELETE: bool = true;

    type Create = CreatePurchaseDto;
    type Update = UpdatePurchaseDto;

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

impl Searchable for Purchase {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.reference_number.clone(),
            self.product.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            self.supplier.as_ref().map(|s| s.name.clone()).unwrap_or_default(),
            self.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default(),
            self.status.label().to_string(),
        ]
    }
}

impl Sortable for Purchase {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "referenceNumber" => SortValue::text(&self.reference_number),
            "purchaseDate" => SortValue::text(&self.purchase_date),
            "supplier" => SortValue::opt_text(self.supplier.as_ref().map(|s| s.name.as_str())),
            "product" => SortValue::opt_text(self.product.as_ref().map(|p| p.name.as_str())),
            "warehouse" => SortValue::opt_text(self.warehouse.as_ref().map(|w| w.name.as_str())),
            "weight" => SortValue::Number(self.weight),
            "pricePerUnit" => SortValue::Number(self.price_per_unit),
            "totalCost" => SortValue::Number(total_cost(self)),
            "status" => SortValue::text(self.status.label()),
            _ => SortValue::Empty,
        }
    }
}

/// Стоимость партии: из ответа сервера, иначе вес × цена
pub fn total_cost(purchase: &Purchase) -> f64 {
    purchase
        .total_cost
        .unwrap_or(purchase.weight * purchase.price_per_unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_purchase::aggregate::PurchaseStatus;
    use contracts::domain::common::Supplier;

    fn purchase(id: i64, status: PurchaseStatus) -> Purchase {
        Purchase {
            id,
            reference_number: format!("PUR-2024-{:05}", id),
            supplier_id: 2,
            supplier: Some(Supplier {
                id: 2,
                name: "Agro LLC".into(),
                contact_person: None,
                phone: None,
            }),
            product_id: 9,
            product: None,
            warehouse_id: 1,
            warehouse: None,
            weight: 100.0,
            price_per_unit: 2.5,
            total_cost: None,
            status,
            purchase_date: "2024-05-02".into(),
            notes: None,
            created_by: None,
            created_at: "2024-05-02T10:00:00Z".into(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_search_matches_supplier_and_status_label() {
        let p = purchase(1, PurchaseStatus::Approved);
        assert!(p.matches_filter("agro"));
        assert!(p.matches_filter("утвержд"));
        assert!(!p.matches_filter("cocoa"));
    }

    #[test]
    fn test_total_cost_falls_back_to_weight_times_price() {
        let mut p = purchase(1, PurchaseStatus::Pending);
        assert_eq!(total_cost(&p), 250.0);
        p.total_cost = Some(260.0);
        assert_eq!(p.sort_value("totalCost"), SortValue::Number(260.0));
        assert_eq!(p.sort_value("missing"), SortValue::Empty);
    }
}
