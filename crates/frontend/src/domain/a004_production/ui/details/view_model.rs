use contracts::domain::a004_production::aggregate::{
    CreateProductionDto, Production, ProductionStatus, UpdateProductionDto,
};

use crate::shared::collection::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel};
use crate::shared::collection::{LookupKind, ValidationErrors};
use crate::shared::date_utils::today_iso;

fn statuses() -> Vec<(&'static str, &'static str)> {
    ProductionStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect()
}

fn check_quantities(r: &mut FieldReader<'_>, input: f64, output: Option<f64>) {
    r.check("inputQuantity", input > 0.0, "Количество сырья должно быть больше нуля");
    if let Some(output) = output {
        r.check("outputQuantity", output >= 0.0, "Выход не может быть отрицательным");
    }
}

impl FormModel for Production {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("productId", "Продукт", FieldKind::Select(LookupKind::Products)).required(),
            FieldSpec::new("warehouseId", "Склад", FieldKind::Select(LookupKind::Warehouses)).required(),
            FieldSpec::new("inputQuantity", "Сырьё, кг", FieldKind::Number).required(),
            FieldSpec::new("outputQuantity", "Выход, кг", FieldKind::Number),
            FieldSpec::new("productionDate", "Дата производства", FieldKind::Date).required(),
            FieldSpec::new("status", "Статус", FieldKind::Choice(statuses))
                .required()
                .edit_only(),
            FieldSpec::new("notes", "Примечание", FieldKind::Textarea),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::from_pairs([("productionDate", today_iso())])
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("productId", self.product_id.to_string()),
            ("warehouseId", self.warehouse_id.to_string()),
            ("inputQuantity", self.input_quantity.to_string()),
            (
                "outputQuantity",
                self.output_quantity.map(|q| q.to_string()).unwrap_or_default(),
            ),
            ("productionDate", self.production_date.clone()),
            ("status", self.status.as_str().to_string()),
            ("notes", self.notes.clone().unwrap_or_default()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<CreateProductionDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let dto = CreateProductionDto {
            product_id: r.required_id("productId"),
            warehouse_id: r.required_id("warehouseId"),
            input_quantity: r.required_number("inputQuantity"),
            output_quantity: r.optional_number("outputQuantity"),
            production_date: r.required_date("productionDate"),
            notes: r.optional_text("notes"),
        };
        check_quantities(&mut r, dto.input_quantity, dto.output_quantity);
        r.finish()?;
        Ok(dto)
    }

    fn to_update(draft: &FormDraft) -> Result<UpdateProductionDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let status = r.required_choice("status", ProductionStatus::parse);
        let dto = UpdateProductionDto {
            warehouse_id: r.required_id("warehouseId"),
            input_quantity: r.required_number("inputQuantity"),
            output_quantity: r.optional_number("outputQuantity"),
            production_date: r.required_date("productionDate"),
            status: status.unwrap_or(ProductionStatus::Unknown),
            notes: r.optional_text("notes"),
        };
        check_quantities(&mut r, dto.input_quantity, dto.output_quantity);
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

    #[test]
    fn test_optional_output_quantity() {
        let mut draft = FormDraft::from_pairs([
            ("productId", "2"),
            ("warehouseId", "1"),
            ("inputQuantity", "200"),
            ("outputQuantity", ""),
            ("productionDate", "2024-04-01"),
        ]);
        assert_eq!(Production::to_create(&draft).unwrap().output_quantity, None);

        draft.set_field("outputQuantity", "many");
        let errors = Production::to_create(&draft).unwrap_err();
        assert!(errors.for_field("outputQuantity").is_some());
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let draft = FormDraft::from_pairs([
            ("warehouseId", "1"),
            ("inputQuantity", "10"),
            ("productionDate", "01.04.2024"),
            ("status", "completed"),
        ]);
        let errors = Production::to_update(&draft).unwrap_err();
        assert!(errors.for_field("productionDate").is_some());
        assert!(errors.for_field("status").is_none());
    }
}
