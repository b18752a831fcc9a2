use contracts::domain::a001_purchase::aggregate::{Purchase, PurchaseStatus};
use leptos::prelude::*;

use crate::domain::a001_purchase::api::total_cost;
use crate::shared::collection::page::collection_page;
use crate::shared::collection::view::{badge_class, BadgeTone};
use crate::shared::collection::{Column, FilterSpec, ListView, LookupKind, SortSpec};
use crate::shared::date_utils::{format_date, format_quantity};

fn status_options() -> Vec<(String, String)> {
    PurchaseStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

fn status_badge(purchase: &Purchase) -> &'static str {
    badge_class(match purchase.status {
        PurchaseStatus::Pending => BadgeTone::Warning,
        PurchaseStatus::Approved => BadgeTone::Info,
        PurchaseStatus::Received => BadgeTone::Success,
        PurchaseStatus::Rejected | PurchaseStatus::Cancelled => BadgeTone::Error,
        PurchaseStatus::Unknown => BadgeTone::Neutral,
    })
}

impl ListView for Purchase {
    const TITLE: &'static str = "Закупки";
    const PAGE_ID: &'static str = "a001_purchase--list";
    const SEARCH_PLACEHOLDER: &'static str = "Номер, товар, поставщик...";
    const CREATE_TITLE: &'static str = "Новая закупка";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Номер", |p: &Purchase| p.reference_number.clone()).sortable("referenceNumber"),
            Column::new("Дата", |p: &Purchase| format_date(&p.purchase_date)).sortable("purchaseDate"),
            Column::new("Поставщик", |p: &Purchase| {
                p.supplier.as_ref().map(|s| s.name.clone()).unwrap_or_default()
            })
            .sortable("supplier"),
            Column::new("Товар", |p: &Purchase| {
                p.product.as_ref().map(|x| x.name.clone()).unwrap_or_default()
            })
            .sortable("product"),
            Column::new("Склад", |p: &Purchase| {
                p.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default()
            })
            .sortable("warehouse"),
            Column::new("Вес, кг", |p: &Purchase| format_quantity(p.weight))
                .sortable("weight")
                .right(),
            Column::new("Цена", |p: &Purchase| format_quantity(p.price_per_unit))
                .sortable("pricePerUnit")
                .right(),
            Column::new("Сумма", |p: &Purchase| format_quantity(total_cost(p)))
                .sortable("totalCost")
                .right(),
            Column::new("Статус", |p: &Purchase| p.status.label().to_string())
                .sortable("status")
                .badge(status_badge),
        ]
    }

    fn filters() -> Vec<FilterSpec> {
        vec![
            FilterSpec::fixed("status", "Статус", status_options),
            FilterSpec::lookup("supplierId", "Поставщик", LookupKind::Suppliers),
            FilterSpec::lookup("warehouseId", "Склад", LookupKind::Warehouses),
        ]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("purchaseDate"))
    }

    fn edit_title(&self) -> String {
        format!("Закупка {}", self.reference_number)
    }
}

#[component]
pub fn PurchaseList() -> impl IntoView {
    collection_page::<Purchase>()
}
