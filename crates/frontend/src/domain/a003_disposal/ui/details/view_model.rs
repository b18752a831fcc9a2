use contracts::domain::a003_disposal::aggregate::{CreateDisposalDto, Disposal, DisposalMethod, UpdateDisposalDto};

use crate::shared::collection::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel};
use crate::shared::collection::{LookupKind, ValidationErrors};
use crate::shared::date_utils::today_iso;

fn methods() -> Vec<(&'static str, &'static str)> {
    DisposalMethod::ALL.iter().map(|m| (m.as_str(), m.label())).collect()
}

/// Общая часть создания и изменения
struct DisposalFields {
    quantity: f64,
    reason: String,
    method: DisposalMethod,
    disposal_date: String,
    notes: Option<String>,
}

fn read_common(r: &mut FieldReader<'_>) -> DisposalFields {
    let method = r.required_choice("method", DisposalMethod::parse);
    let fields = DisposalFields {
        quantity: r.required_number("quantity"),
        reason: r.required_text("reason"),
        method: method.unwrap_or(DisposalMethod::Other),
        disposal_date: r.required_date("disposalDate"),
        notes: r.optional_text("notes"),
    };
    r.check("quantity", fields.quantity > 0.0, "Количество должно быть больше нуля");
    fields
}

impl FormModel for Disposal {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("productId", "Товар", FieldKind::Select(LookupKind::Products)).required(),
            FieldSpec::new("warehouseId", "Склад", FieldKind::Select(LookupKind::Warehouses)).required(),
            FieldSpec::new("quantity", "Количество", FieldKind::Number).required(),
            FieldSpec::new("reason", "Причина", FieldKind::Text).required(),
            FieldSpec::new("method", "Способ утилизации", FieldKind::Choice(methods)).required(),
            FieldSpec::new("disposalDate", "Дата", FieldKind::Date).required(),
            FieldSpec::new("notes", "Примечание", FieldKind::Textarea),
        ]
    }

    fn empty_draft() -> FormDraft {
        FormDraft::from_pairs([("disposalDate", today_iso())])
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("productId", self.product_id.to_string()),
            ("warehouseId", self.warehouse_id.to_string()),
            ("quantity", self.quantity.to_string()),
            ("reason", self.reason.clone()),
            ("method", self.method.as_str().to_string()),
            ("disposalDate", self.disposal_date.clone()),
            ("notes", self.notes.clone().unwrap_or_default()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<CreateDisposalDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let product_id = r.required_id("productId");
        let warehouse_id = r.required_id("warehouseId");
        let f = read_common(&mut r);
        r.finish()?;
        Ok(CreateDisposalDto {
            product_id,
            warehouse_id,
            quantity: f.quantity,
            reason: f.reason,
            method: f.method,
            disposal_date: f.disposal_date,
            notes: f.notes,
        })
    }

    fn to_update(draft: &FormDraft) -> Result<UpdateDisposalDto, ValidationErrors> {
        let mut r = FieldReader::new(draft);
        let f = read_common(&mut r);
        r.finish()?;
        Ok(UpdateDisposalDto {
            quantity: f.quantity,
            reason: f.reason,
            method: f.method,
            disposal_date: f.disposal_date,
            notes: f.notes,
        })
    }

    fn locked_on_edit(&self) -> Vec<&'static str> {
        vec!["productId", "warehouseId"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_collected_for_every_field() {
        let draft = FormDraft::from_pairs([("quantity", "-3"), ("method", "burial")]);
        let errors = Disposal::to_create(&draft).unwrap_err();
        for field in ["productId", "warehouseId", "quantity", "reason", "method", "disposalDate"] {
            assert!(errors.for_field(field).is_some(), "no error for {}", field);
        }
        assert!(errors.for_field("notes").is_none());
    }

    #[test]
    fn test_update_ignores_locked_fields() {
        let draft = FormDraft::from_pairs([
            ("productId", ""),
            ("quantity", "5"),
            ("reason", "Expired"),
            ("method", "recycling"),
            ("disposalDate", "2024-03-10"),
        ]);
        let dto = Disposal::to_update(&draft).unwrap();
        assert_eq!(dto.method, DisposalMethod::Recycling);
        assert_eq!(dto.reason, "Expired");
    }
}
