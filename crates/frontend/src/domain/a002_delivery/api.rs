use contracts::domain::a002_delivery::aggregate::{CreateDeliveryDto, Delivery, UpdateDeliveryDto};

use crate::shared::collection::CollectionEntity;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};

impl CollectionEntity for Delivery {
    const PATH: &'static str = "/deliveries";
    const SOFT_DELETE: bool = true;

    type Create = CreateDeliveryDto;
    type Update = UpdateDeliveryDto;

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

impl Searchable for Delivery {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.reference_number.clone(),
            self.product.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            self.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default(),
            self.customer_name.clone(),
            self.driver.as_ref().map(|d| d.name.clone()).unwrap_or_default(),
            self.status.label().to_string(),
        ]
    }
}

impl Sortable for Delivery {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "referenceNumber" => SortValue::text(&self.reference_number),
            "deliveryDate" => SortValue::text(&self.delivery_date),
            "product" => SortValue::opt_text(self.product.as_ref().map(|p| p.name.as_str())),
            "warehouse" => SortValue::opt_text(self.warehouse.as_ref().map(|w| w.name.as_str())),
            "customerName" => SortValue::text(&self.customer_name),
            "driver" => SortValue::opt_text(self.driver.as_ref().map(|d| d.name.as_str())),
            "quantity" => SortValue::Number(self.quantity),
            "status" => SortValue::text(self.status.label()),
            _ => SortValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_driver_sorts_as_empty() {
        let delivery: Delivery = serde_json::from_value(json!({
            "id": 3, "referenceNumber": "DEL-3", "productId": 1, "warehouseId": 2,
            "customerName": "Retail Co", "quantity": 40.0, "deliveryDate": "2024-06-01",
            "status": "in_transit", "createdAt": "2024-06-01T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(delivery.sort_value("driver"), SortValue::Empty);
        assert!(delivery.matches_filter("retail"));
        assert!(delivery.matches_filter("в пути"));
        assert!(!delivery.is_deleted());
    }
}
