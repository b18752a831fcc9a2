use contracts::domain::a005_stock_movement::aggregate::{
    CreateStockMovementDto, StockMovement, UpdateStockMovementDto,
};

use crate::shared::collection::CollectionEntity;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};

// Движения не удаляются мягко: restore не поддерживается
impl CollectionEntity for StockMovement {
    const PATH: &'static str = "/stock-movements";

    type Create = CreateStockMovementDto;
    type Update = UpdateStockMovementDto;

    fn id(&self) -> i64 {
        self.id
    }
}

fn warehouse_name(warehouse: Option<&contracts::domain::common::Warehouse>) -> String {
    warehouse.map(|w| w.name.clone()).unwrap_or_default()
}

impl Searchable for StockMovement {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.reference_number.clone(),
            self.product.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            warehouse_name(self.from_warehouse.as_ref()),
            warehouse_name(self.to_warehouse.as_ref()),
            self.movement_type.label().to_string(),
        ]
    }
}

impl Sortable for StockMovement {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "referenceNumber" => SortValue::text(&self.reference_number),
            "movementDate" => SortValue::text(&self.movement_date),
            "product" => SortValue::opt_text(self.product.as_ref().map(|p| p.name.as_str())),
            "fromWarehouse" => SortValue::opt_text(self.from_warehouse.as_ref().map(|w| w.name.as_str())),
            "toWarehouse" => SortValue::opt_text(self.to_warehouse.as_ref().map(|w| w.name.as_str())),
            "quantity" => SortValue::Number(self.quantity),
            "movementType" => SortValue::text(self.movement_type.label()),
            _ => SortValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_movement_is_never_deleted() {
        let movement: StockMovement = serde_json::from_value(json!({
            "id": 8, "referenceNumber": "MOV-8", "productId": 1,
            "fromWarehouseId": 1, "fromWarehouse": { "id": 1, "name": "Main" },
            "toWarehouseId": 2, "toWarehouse": { "id": 2, "name": "Outlet" },
            "quantity": 15.0, "movementType": "transfer",
            "movementDate": "2024-02-11", "createdAt": "2024-02-11T09:00:00Z",
            "deletedAt": "2024-02-12T00:00:00Z"
        }))
        .unwrap();
        assert!(!StockMovement::SOFT_DELETE);
        assert!(!movement.is_deleted());
        assert!(movement.matches_filter("outlet"));
        assert!(movement.matches_filter("перемещ"));
    }
}
