use contracts::domain::a001_purchase::aggregate::{CreatePurchaseDto, Purchase, UpdatePurchaseDto};
use contracts::domain::common::ProductPrice;
use serde_json::Value;

use crate::shared::collection::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel, Reactions};
use crate::shared::collection::{LookupKind, LookupSource, ValidationErrors};
use crate::shared::date_utils::today_iso;
use crate::shared::http::ApiError;

/// Поля формы в порядке отображения; имена совпадают с полями API
struct PurchaseFields {
    supplier_id: i64,
    product_id: i64,
    warehouse_id: i64,
    weight: f64,
    price_per_unit: f64,
    purchase_date: String,
    notes: Option<String>,
}

fn read(draft: &FormDraft) -> Result<PurchaseFields, ValidationErrors> {
    let mut r = FieldReader::new(draft);
    let fields = PurchaseFields {
        supplier_id: r.required_id("supplierId"),
        product_id: r.required_id("productId"),
        warehouse_id: r.required_id("warehouseId"),
        weight: r.required_number("weight"),
        price_per_unit: r.required_number("pricePerUnit"),
        purchase_date: r.required_date("purchaseDate"),
        notes: r.optional_text("notes"),
    };
    r.check("weight", fields.weight > 0.0, "Вес должен быть больше нуля");
    r.check("pricePerUnit", fields.price_per_unit >= 0.0, "Цена не может быть отрицательной");
    r.finish()?;
    Ok(fields)
}

impl FormModel for Purchase {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("supplierId", "Поставщик", FieldKind::Select(LookupKind::Suppliers)).required(),
            FieldSpec::new("productId", "Товар", FieldKind::Select(LookupKind::Products)).required(),
            FieldSpec::new("warehouseId", "Склад", FieldKind::Select(LookupKind::Warehouses)).required(),
            FieldSpec::new("weight", "Вес, кг", FieldKind::Number).required(),
            FieldSpec::new("pricePerUnit", "Цена за единицу", FieldKind::Number).required(),
            FieldSpec::new("purchaseDate", "Дата закупки", FieldKind::Date).required(),
            FieldSpec::new("notes", "Примечание", FieldKind::Textarea),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::from_pairs([("purchaseDate", today_iso())])
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("supplierId", self.supplier_id.to_string()),
            ("productId", self.product_id.to_string()),
            ("warehouseId", self.warehouse_id.to_string()),
            ("weight", self.weight.to_string()),
            ("pricePerUnit", self.price_per_unit.to_string()),
            ("purchaseDate", self.purchase_date.clone()),
            ("notes", self.notes.clone().unwrap_or_default()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<CreatePurchaseDto, ValidationErrors> {
        let f = read(draft)?;
        Ok(CreatePurchaseDto {
            supplier_id: f.supplier_id,
            product_id: f.product_id,
            warehouse_id: f.warehouse_id,
            weight: f.weight,
            price_per_unit: f.price_per_unit,
            purchase_date: f.purchase_date,
            notes: f.notes,
        })
    }

    fn to_update(draft: &FormDraft) -> Result<UpdatePurchaseDto, ValidationErrors> {
        let f = read(draft)?;
        Ok(UpdatePurchaseDto {
            supplier_id: f.supplier_id,
            product_id: f.product_id,
            warehouse_id: f.warehouse_id,
            weight: f.weight,
            price_per_unit: f.price_per_unit,
            purchase_date: f.purchase_date,
            notes: f.notes,
        })
    }

    fn locked_on_edit(&self) -> Vec<&'static str> {
        if self.is_locked() {
            vec!["supplierId", "productId"]
        } else {
            Vec::new()
        }
    }

    /// Выбор товара подтягивает его текущую цену
    fn reactions<L: LookupSource + Clone + 'static>(source: &L) -> Reactions {
        let source = source.clone();
        Reactions::default().on("productId", move |product_id| {
            let source = source.clone();
            Box::pin(async move {
                let price: ProductPrice = source
                    .fetch_one(&format!("/products/{}/price", product_id))
                    .await?;
                serde_json::to_value(price).map_err(|e| ApiError::Decode(e.to_string()))
            })
        })
    }

    fn apply_derived(draft: &mut FormDraft, field: &str, value: &Value) {
        if field != "productId" || !draft.get("pricePerUnit").trim().is_empty() {
            return;
        }
        if let Some(price) = value.get("pricePerUnit").and_then(Value::as_f64) {
            draft.set_field("pricePerUnit", price.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form_bridge::MSG_NUMBER;
    use crate::shared::collection::FormBridge;
    use contracts::domain::a001_purchase::aggregate::PurchaseStatus;
    use serde_json::json;

    fn draft(weight: &str) -> FormDraft {
        FormDraft::from_pairs([
            ("supplierId", "2"),
            ("productId", "9"),
            ("warehouseId", "1"),
            ("weight", weight),
            ("pricePerUnit", "3,5"),
            ("purchaseDate", "2024-05-02"),
            ("notes", "  "),
        ])
    }

    #[test]
    fn test_to_create_coerces_strings() {
        let dto = Purchase::to_create(&draft("1250.5")).unwrap();
        assert_eq!(dto.weight, 1250.5);
        assert_eq!(dto.price_per_unit, 3.5);
        assert_eq!(dto.supplier_id, 2);
        assert_eq!(dto.notes, None);
    }

    #[test]
    fn test_non_numeric_weight_is_rejected() {
        let errors = Purchase::to_create(&draft("abc")).unwrap_err();
        assert_eq!(errors.for_field("weight"), Some(MSG_NUMBER));
        assert_eq!(errors.for_field("pricePerUnit"), None);
    }

    #[test]
    fn test_zero_weight_is_rejected() {
        let errors = Purchase::to_update(&draft("0")).unwrap_err();
        assert!(errors.for_field("weight").is_some());
    }

    #[test]
    fn test_approved_purchase_locks_supplier_and_product() {
        let mut value = json!({
            "id": 5, "referenceNumber": "PUR-1", "supplierId": 2, "productId": 9,
            "warehouseId": 1, "weight": 10.0, "pricePerUnit": 1.0, "status": "approved",
            "purchaseDate": "2024-05-02", "createdAt": "2024-05-02T10:00:00Z"
        });
        let approved: Purchase = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(approved.locked_on_edit(), vec!["supplierId", "productId"]);

        value["status"] = json!("pending");
        let pending: Purchase = serde_json::from_value(value).unwrap();
        assert_eq!(pending.status, PurchaseStatus::Pending);
        assert!(pending.locked_on_edit().is_empty());
        assert_eq!(pending.to_draft().get("productId"), "9");
    }

    #[test]
    fn test_price_reaction_fills_empty_price_only() {
        let mut bridge = FormBridge::new(FormDraft::new());
        let change = bridge.set_field("productId", "9");
        assert!(bridge.store_reaction::<Purchase>(&change, json!({"productId": 9, "pricePerUnit": 4.2})));
        assert_eq!(bridge.draft().get("pricePerUnit"), "4.2");

        bridge.set_field("pricePerUnit", "5");
        let change = bridge.set_field("productId", "10");
        bridge.store_reaction::<Purchase>(&change, json!({"productId": 10, "pricePerUnit": 7.0}));
        assert_eq!(bridge.draft().get("pricePerUnit"), "5");
    }
}
