use contracts::domain::a004_production::aggregate::{CreateProductionDto, Production, UpdateProductionDto};

use crate::shared::collection::CollectionEntity;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};

impl CollectionEntity for Production {
    const PATH: &'static str = "/productions";
    const SOFT_DELETE: bool = true;

    type Create = CreateProductionDto;
    type Update = UpdateProductionDto;

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

impl Searchable for Production {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.batch_number.clone(),
            self.product.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            self.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default(),
            self.status.label().to_string(),
        ]
    }
}

impl Sortable for Production {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "batchNumber" => SortValue::text(&self.batch_number),
            "productionDate" => SortValue::text(&self.production_date),
            "product" => SortValue::opt_text(self.product.as_ref().map(|p| p.name.as_str())),
            "warehouse" => SortValue::opt_text(self.warehouse.as_ref().map(|w| w.name.as_str())),
            "inputQuantity" => SortValue::Number(self.input_quantity),
            "outputQuantity" => SortValue::opt_number(self.output_quantity),
            "totalCost" => SortValue::opt_number(self.total_cost),
            "status" => SortValue::text(self.status.label()),
            _ => SortValue::Empty,
        }
    }
}

/// Выход готовой продукции, % от сырья
pub fn yield_percent(production: &Production) -> Option<f64> {
    let output = production.output_quantity?;
    (production.input_quantity > 0.0).then(|| output / production.input_quantity * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yield_and_unset_output() {
        let mut production: Production = serde_json::from_value(json!({
            "id": 1, "batchNumber": "B-001", "productId": 2, "warehouseId": 1,
            "inputQuantity": 200.0, "status": "in_progress",
            "productionDate": "2024-04-01", "createdAt": "2024-04-01T07:00:00Z"
        }))
        .unwrap();
        assert_eq!(yield_percent(&production), None);
        assert_eq!(production.sort_value("outputQuantity"), SortValue::Empty);

        production.output_quantity = Some(150.0);
        assert_eq!(yield_percent(&production), Some(75.0));
    }
}
