use contracts::domain::a003_disposal::aggregate::{CreateDisposalDto, Disposal, UpdateDisposalDto};

use crate::shared::collection::CollectionEntity;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};

impl CollectionEntity for Disposal {
    const PATH: &'static str = "/disposals";
    const SOFT_DELETE: bool = true;

    type Create = CreateDisposalDto;
    type Update = UpdateDisposalDto;

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

impl Searchable for Disposal {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.reference_number.clone(),
            self.product.as_ref().map(|p| p.name.clone()).unwrap_or_default(),
            self.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default(),
            self.method.label().to_string(),
            self.status.label().to_string(),
        ]
    }
}

impl Sortable for Disposal {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "referenceNumber" => SortValue::text(&self.reference_number),
            "disposalDate" => SortValue::text(&self.disposal_date),
            "product" => SortValue::opt_text(self.product.as_ref().map(|p| p.name.as_str())),
            "warehouse" => SortValue::opt_text(self.warehouse.as_ref().map(|w| w.name.as_str())),
            "quantity" => SortValue::Number(self.quantity),
            "reason" => SortValue::text(&self.reason),
            "method" => SortValue::text(self.method.label()),
            "status" => SortValue::text(self.status.label()),
            _ => SortValue::Empty,
        }
    }
}
