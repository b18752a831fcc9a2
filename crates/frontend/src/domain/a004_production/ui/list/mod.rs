use contracts::domain::a004_production::aggregate::{Production, ProductionStatus};
use leptos::prelude::*;

use crate::domain::a004_production::api::yield_percent;
use crate::shared::collection::page::collection_page;
use crate::shared::collection::view::{badge_class, BadgeTone};
use crate::shared::collection::{Column, FilterSpec, ListView, SortSpec};
use crate::shared::date_utils::{format_date, format_opt_quantity, format_quantity};

fn status_options() -> Vec<(String, String)> {
    ProductionStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

fn status_badge(production: &Production) -> &'static str {
    badge_class(match production.status {
        ProductionStatus::Planned => BadgeTone::Neutral,
        ProductionStatus::InProgress => BadgeTone::Info,
        ProductionStatus::Completed => BadgeTone::Success,
        ProductionStatus::Cancelled => BadgeTone::Error,
        ProductionStatus::Unknown => BadgeTone::Neutral,
    })
}

impl ListView for Production {
    const TITLE: &'static str = "Производство";
    const PAGE_ID: &'static str = "a004_production--list";
    const SEARCH_PLACEHOLDER: &'static str = "Партия, продукт, склад...";
    const CREATE_TITLE: &'static str = "Новая партия";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Партия", |p: &Production| p.batch_number.clone()).sortable("batchNumber"),
            Column::new("Дата", |p: &Production| format_date(&p.production_date)).sortable("productionDate"),
            Column::new("Продукт", |p: &Production| {
                p.product.as_ref().map(|x| x.name.clone()).unwrap_or_default()
            })
            .sortable("product"),
            Column::new("Склад", |p: &Production| {
                p.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default()
            })
            .sortable("warehouse"),
            Column::new("Сырьё", |p: &Production| format_quantity(p.input_quantity))
                .sortable("inputQuantity")
                .right(),
            Column::new("Выход", |p: &Production| format_opt_quantity(p.output_quantity))
                .sortable("outputQuantity")
                .right(),
            Column::new("Выход, %", |p: &Production| {
                yield_percent(p)
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "—".into())
            })
            .right(),
            Column::new("Себестоимость", |p: &Production| format_opt_quantity(p.total_cost))
                .sortable("totalCost")
                .right(),
            Column::new("Статус", |p: &Production| p.status.label().to_string())
                .sortable("status")
                .badge(status_badge),
        ]
    }

    fn filters() -> Vec<FilterSpec> {
        vec![FilterSpec::fixed("status", "Статус", status_options)]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("productionDate"))
    }

    fn edit_title(&self) -> String {
        format!("Партия {}", self.batch_number)
    }
}

#[component]
pub fn ProductionList() -> impl IntoView {
    collection_page::<Production>()
}
