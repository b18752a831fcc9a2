use contracts::domain::a003_disposal::aggregate::{Disposal, DisposalMethod, DisposalStatus};
use leptos::prelude::*;

use crate::shared::collection::page::collection_page;
use crate::shared::collection::view::{badge_class, BadgeTone};
use crate::shared::collection::{Column, FilterSpec, ListView, SortSpec};
use crate::shared::date_utils::{format_date, format_quantity};

fn status_options() -> Vec<(String, String)> {
    DisposalStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

fn method_options() -> Vec<(String, String)> {
    DisposalMethod::ALL
        .iter()
        .map(|m| (m.as_str().to_string(), m.label().to_string()))
        .collect()
}

fn status_badge(disposal: &Disposal) -> &'static str {
    badge_class(match disposal.status {
        DisposalStatus::Pending => BadgeTone::Warning,
        DisposalStatus::Approved => BadgeTone::Info,
        DisposalStatus::Completed => BadgeTone::Success,
        DisposalStatus::Unknown => BadgeTone::Neutral,
    })
}

impl ListView for Disposal {
    const TITLE: &'static str = "Утилизация";
    const PAGE_ID: &'static str = "a003_disposal--list";
    const CREATE_TITLE: &'static str = "Новый акт утилизации";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Номер", |d: &Disposal| d.reference_number.clone()).sortable("referenceNumber"),
            Column::new("Дата", |d: &Disposal| format_date(&d.disposal_date)).sortable("disposalDate"),
            Column::new("Товар", |d: &Disposal| {
                d.product.as_ref().map(|p| p.name.clone()).unwrap_or_default()
            })
            .sortable("product"),
            Column::new("Склад", |d: &Disposal| {
                d.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default()
            })
            .sortable("warehouse"),
            Column::new("Количество", |d: &Disposal| format_quantity(d.quantity))
                .sortable("quantity")
                .right(),
            Column::new("Причина", |d: &Disposal| d.reason.clone()),
            Column::new("Способ", |d: &Disposal| d.method.label().to_string()).sortable("method"),
            Column::new("Статус", |d: &Disposal| d.status.label().to_string())
                .sortable("status")
                .badge(status_badge),
        ]
    }

    fn filters() -> Vec<FilterSpec> {
        vec![
            FilterSpec::fixed("status", "Статус", status_options),
            FilterSpec::fixed("method", "Способ", method_options),
        ]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("disposalDate"))
    }

    fn edit_title(&self) -> String {
        format!("Утилизация {}", self.reference_number)
    }
}

#[component]
pub fn DisposalList() -> impl IntoView {
    collection_page::<Disposal>()
}
