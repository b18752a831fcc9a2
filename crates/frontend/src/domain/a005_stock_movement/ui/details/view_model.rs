use contracts::domain::a005_stock_movement::aggregate::{
    CreateStockMovementDto, MovementType, StockMovement, UpdateStockMovementDto,
};

use crate::shared::collection::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel};
use crate::shared::collection::{LookupKind, ValidationErrors};
use crate::shared::date_utils::today_iso;

fn movement_types() -> Vec<(&'static str, &'static str)> {
    MovementType::ALL.iter().map(|t| (t.as_str(), t.label())).collect()
}

/// Какие склады обязательны для типа движения
fn check_warehouses(r: &mut FieldReader<'_>, kind: MovementType, from: Option<i64>, to: Option<i64>) {
    match kind {
        MovementType::Inbound => r.check("toWarehouseId", to.is_some(), "Укажите склад-получатель"),
        MovementType::Outbound => r.check("fromWarehouseId", from.is_some(), "Укажите склад-отправитель"),
        MovementType::Transfer => {
            r.check("fromWarehouseId", from.is_some(), "Укажите склад-отправитель");
            r.check("toWarehouseId", to.is_some(), "Укажите склад-получатель");
            if from.is_some() {
                r.check("toWarehouseId", from != to, "Склады должны различаться");
            }
        }
        MovementType::Adjustment => r.check(
            "toWarehouseId",
            from.is_some() || to.is_some(),
            "Укажите склад",
        ),
        MovementType::Unknown => {}
    }
}

impl FormModel for StockMovement {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("movementType", "Тип движения", FieldKind::Choice(movement_types))
                .required()
                .create_only(),
            FieldSpec::new("productId", "Товар", FieldKind::Select(LookupKind::Products)).required(),
            FieldSpec::new("fromWarehouseId", "Со склада", FieldKind::Select(LookupKind::Warehouses))
                .create_only(),
            FieldSpec::new("toWarehouseId", "На склад", FieldKind::Select(LookupKind::Warehouses))
                .create_only(),
            FieldSpec::new("quantity", "Количество", FieldKind::Number).required(),
            FieldSpec::new("movementDate", "Дата", FieldKind::Date).required(),
            FieldSpec::new("notes", "Примечание", FieldKind::Textarea),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::from_pairs([("movementDate", today_iso())])
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("movementType", self.movement_type.as_str().to_string()),
            ("productId", self.product_id.to_string()),
            (
                "fromWarehouseId",
                self.from_warehouse_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            (
                "toWarehouseId",
                self.to_warehouse_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            ("quantity", self.quantity.to_string()),
            ("movementDate", self.movement_date.clone()),
            ("notes", self.notes.clone().unwrap_or_default()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<CreateStockMovementDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let movement_type = r.required_choice("movementType", MovementType::parse);
        let dto = CreateStockMovementDto {
            product_id: r.required_id("productId"),
            from_warehouse_id: r.optional_id("fromWarehouseId"),
            to_warehouse_id: r.optional_id("toWarehouseId"),
            quantity: r.required_number("quantity"),
            movement_type: movement_type.unwrap_or(MovementType::Unknown),
            movement_date: r.required_date("movementDate"),
            notes: r.optional_text("notes"),
        };
        r.check("quantity", dto.quantity > 0.0, "Количество должно быть больше нуля");
        check_warehouses(&mut r, dto.movement_type, dto.from_warehouse_id, dto.to_warehouse_id);
        r.finish()?;
        Ok(dto)
    }

    fn to_update(draft: &FormDraft) -> Result<UpdateStockMovementDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let dto = UpdateStockMovementDto {
            quantity: r.required_number("quantity"),
            movement_date: r.required_date("movementDate"),
            notes: r.optional_text("notes"),
        };
        r.check("quantity", dto.quantity > 0.0, "Количество должно быть больше нуля");
        r.finish()?;
        Ok(dto)
    }

    fn locked_on_edit(&self) -> Vec<&'static str> {
        vec!["productId"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: &str, from: &str, to: &str) -> FormDraft {
        FormDraft::from_pairs([
            ("movementType", kind),
            ("productId", "1"),
            ("fromWarehouseId", from),
            ("toWarehouseId", to),
            ("quantity", "15"),
            ("movementDate", "2024-02-11"),
        ])
    }

    #[test]
    fn test_transfer_needs_two_distinct_warehouses() {
        assert!(StockMovement::to_create(&draft("transfer", "1", "2")).is_ok());

        let same = StockMovement::to_create(&draft("transfer", "1", "1")).unwrap_err();
        assert_eq!(same.for_field("toWarehouseId"), Some("Склады должны различаться"));

        let missing = StockMovement::to_create(&draft("transfer", "", "2")).unwrap_err();
        assert!(missing.for_field("fromWarehouseId").is_some());
    }

    #[test]
    fn test_inbound_needs_destination_only() {
        let dto = StockMovement::to_create(&draft("inbound", "", "2")).unwrap();
        assert_eq!(dto.movement_type, MovementType::Inbound);
        assert_eq!(dto.from_warehouse_id, None);
        assert!(StockMovement::to_create(&draft("inbound", "1", "")).is_err());
    }
}
