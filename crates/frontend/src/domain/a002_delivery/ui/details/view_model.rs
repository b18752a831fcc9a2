use contracts::domain::a002_delivery::aggregate::{CreateDeliveryDto, Delivery, DeliveryStatus, UpdateDeliveryDto};

use crate::shared::collection::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel};
use crate::shared::collection::{LookupKind, ValidationErrors};
use crate::shared::date_utils::today_iso;

fn statuses() -> Vec<(&'static str, &'static str)> {
    DeliveryStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect()
}

impl FormModel for Delivery {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("productId", "Товар", FieldKind::Select(LookupKind::Products)).required(),
            FieldSpec::new("warehouseId", "Склад отгрузки", FieldKind::Select(LookupKind::Warehouses)).required(),
            FieldSpec::new("driverId", "Водитель", FieldKind::Select(LookupKind::Drivers)),
            FieldSpec::new("customerName", "Получатель", FieldKind::Text).required(),
            FieldSpec::new("destination", "Адрес доставки", FieldKind::Text),
            FieldSpec::new("quantity", "Количество", FieldKind::Number).required(),
            FieldSpec::new("deliveryDate", "Дата доставки", FieldKind::Date).required(),
            FieldSpec::new("status", "Статус", FieldKind::Choice(statuses))
                .required()
                .edit_only(),
            FieldSpec::new("notes", "Примечание", FieldKind::Textarea),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::from_pairs([("deliveryDate", today_iso())])
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("productId", self.product_id.to_string()),
            ("warehouseId", self.warehouse_id.to_string()),
            ("driverId", self.driver_id.map(|id| id.to_string()).unwrap_or_default()),
            ("customerName", self.customer_name.clone()),
            ("destination", self.destination.clone().unwrap_or_default()),
            ("quantity", self.quantity.to_string()),
            ("deliveryDate", self.delivery_date.clone()),
            ("status", self.status.as_str().to_string()),
            ("notes", self.notes.clone().unwrap_or_default()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<CreateDeliveryDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let dto = CreateDeliveryDto {
            product_id: r.required_id("productId"),
            warehouse_id: r.required_id("warehouseId"),
            driver_id: r.optional_id("driverId"),
            customer_name: r.required_text("customerName"),
            destination: r.optional_text("destination"),
            quantity: r.required_number("quantity"),
            delivery_date: r.required_date("deliveryDate"),
            notes: r.optional_text("notes"),
        };
        r.check("quantity", dto.quantity > 0.0, "Количество должно быть больше нуля");
        r.finish()?;
        Ok(dto)
    }

    fn to_update(draft: &FormDraft) -> Result<UpdateDeliveryDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let status = r.required_choice("status", DeliveryStatus::parse);
        let dto = UpdateDeliveryDto {
            warehouse_id: r.required_id("warehouseId"),
            driver_id: r.optional_id("driverId"),
            customer_name: r.required_text("customerName"),
            destination: r.optional_text("destination"),
            quantity: r.required_number("quantity"),
            delivery_date: r.required_date("deliveryDate"),
            status: status.unwrap_or(DeliveryStatus::Unknown),
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

    fn draft() -> FormDraft {
        FormDraft::from_pairs([
            ("productId", "4"),
            ("warehouseId", "2"),
            ("driverId", ""),
            ("customerName", "Retail Co"),
            ("quantity", "12"),
            ("deliveryDate", "2024-06-01"),
            ("status", "delivered"),
        ])
    }

    #[test]
    fn test_driver_is_optional() {
        let dto = Delivery::to_create(&draft()).unwrap();
        assert_eq!(dto.driver_id, None);
        assert_eq!(dto.customer_name, "Retail Co");
    }

    #[test]
    fn test_update_requires_known_status() {
        let dto = Delivery::to_update(&draft()).unwrap();
        assert_eq!(dto.status, DeliveryStatus::Delivered);

        let mut bad = draft();
        bad.set_field("status", "lost");
        let errors = Delivery::to_update(&bad).unwrap_err();
        assert!(errors.for_field("status").is_some());
    }

    #[test]
    fn test_status_field_is_edit_only() {
        let status = Delivery::fields()
            .into_iter()
            .find(|f| f.name == "status")
            .unwrap();
        assert!(status.visible_in(true));
        assert!(!status.visible_in(false));
    }
}
