use contracts::domain::a002_delivery::aggregate::{Delivery, DeliveryStatus};
use leptos::prelude::*;

use crate::shared::collection::page::collection_page;
use crate::shared::collection::view::{badge_class, BadgeTone};
use crate::shared::collection::{Column, FilterSpec, ListView, LookupKind, SortSpec};
use crate::shared::date_utils::{format_date, format_quantity};

fn status_options() -> Vec<(String, String)> {
    DeliveryStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

fn status_badge(delivery: &Delivery) -> &'static str {
    badge_class(match delivery.status {
        DeliveryStatus::Scheduled => BadgeTone::Neutral,
        DeliveryStatus::InTransit => BadgeTone::Info,
        DeliveryStatus::Delivered => BadgeTone::Success,
        DeliveryStatus::Cancelled => BadgeTone::Error,
        DeliveryStatus::Unknown => BadgeTone::Neutral,
    })
}

impl ListView for Delivery {
    const TITLE: &'static str = "Доставки";
    const PAGE_ID: &'static str = "a002_delivery--list";
    const SEARCH_PLACEHOLDER: &'static str = "Номер, получатель, водитель...";
    const CREATE_TITLE: &'static str = "Новая доставка";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Номер", |d: &Delivery| d.reference_number.clone()).sortable("referenceNumber"),
            Column::new("Дата", |d: &Delivery| format_date(&d.delivery_date)).sortable("deliveryDate"),
            Column::new("Товар", |d: &Delivery| {
                d.product.as_ref().map(|p| p.name.clone()).unwrap_or_default()
            })
            .sortable("product"),
            Column::new("Склад", |d: &Delivery| {
                d.warehouse.as_ref().map(|w| w.name.clone()).unwrap_or_default()
            })
            .sortable("warehouse"),
            Column::new("Получатель", |d: &Delivery| d.customer_name.clone()).sortable("customerName"),
            Column::new("Водитель", |d: &Delivery| {
                d.driver.as_ref().map(|x| x.name.clone()).unwrap_or_else(|| "—".into())
            })
            .sortable("driver"),
            Column::new("Количество", |d: &Delivery| format_quantity(d.quantity))
                .sortable("quantity")
                .right(),
            Column::new("Статус", |d: &Delivery| d.status.label().to_string())
                .sortable("status")
                .badge(status_badge),
        ]
    }

    fn filters() -> Vec<FilterSpec> {
        vec![
            FilterSpec::fixed("status", "Статус", status_options),
            FilterSpec::lookup("warehouseId", "Склад", LookupKind::Warehouses),
        ]
    }

    fn default_sort() -> Option<SortSpec> {
        Some(SortSpec::desc("deliveryDate"))
    }

    fn edit_title(&self) -> String {
        format!("Доставка {}", self.reference_number)
    }
}

#[component]
pub fn DeliveryList() -> impl IntoView {
    collection_page::<Delivery>()
}
