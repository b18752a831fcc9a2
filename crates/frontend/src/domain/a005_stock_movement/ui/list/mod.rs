use contracts::domain::a005_stock_movement::aggregate::{MovementType, StockMovement};
use leptos::prelude::*;

use crate::shared::collection::page::collection_page;
use crate::shared::collection::view::{badge_class, BadgeTone};
use crate::shared::collection::{Column, FilterSpec, ListView, SortSpec};
use crate::shared::date_utils::{format_date, format_quantity};

fn type_options() -> Vec<(String, String)> {
    MovementType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), t.label().to_string()))
        .collect()
}

fn type_badge(movement: &StockMovement) -> &'static str {
    badge_class(match movement.movement_type {
        MovementType::Inbound => BadgeTone::Success,
        MovementType::Outbound => BadgeTone::Warning,
        MovementType::Transfer => BadgeTone::Info,
        MovementType::Adjustment | MovementType::Unknown => BadgeTone::Neutral,
    })
}

fn warehouse_or_dash(warehouse: Option<&contracts::domain::common::Warehouse>) -> String {
    warehouse.map(|w| w.name.clone()).unwrap_or_else(|| "—".into())
}

impl ListView for StockMovement {
    const TITLE: &'static str = "Движение товаров";
    const PAGE_ID: &'static str = "a005_stock_movement--list";
    const CREATE_TITLE: &'static str = "Новое движение";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Номер", |m: &StockMovement| m.reference_number.clone()).sortable("referenceNumber"),
            Column::new("Дата", |m: &StockMovement| format_date(&m.movement_date)).sortable("movementDate"),
            Column::new("Тип", |m: &StockMovement| m.movement_type.label().to_string())
                .sortable("movementType")
                .badge(type_badge),
            Column::new("Товар", |m: &StockMovement| {
                m.product.as_ref().map(|p| p.name.clone()).unwrap_or_default()
            })
            .sortable("product"),
            Column::new("Откуда", |m: &StockMovement| warehouse_or_dash(m.from_warehouse.as_ref()))
                .sortable("fromWarehouse"),
            Column::new("Куда", |m: &StockMovement| warehouse_or_dash(m.to_warehouse.as_ref()))
                .sortable("toWarehouse"),
            Column::new("Количество", |m: &StockMovement| format_quantity(m.quantity))
                .sortable("quantity")
                .right(),
        ]
    }

    fn filters() -> Vec<FilterSpec> {
        vec![FilterSpec::fixed("movementType", "Тип", type_options)]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("movementDate"))
    }

    fn edit_title(&self) -> String {
        format!("Движение {}", self.reference_number)
    }
}

#[component]
pub fn StockMovementList() -> impl IntoView {
    collection_page::<StockMovement>()
}
