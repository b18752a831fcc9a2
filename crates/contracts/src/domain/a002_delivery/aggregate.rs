use crate::domain::common::{Driver, Product, Warehouse};
use serde::{Deserialize, Serialize};

/// Статус доставки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Scheduled,
    InTransit,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Scheduled,
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
        DeliveryStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Scheduled => "scheduled",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Cancelled => "cancelled",
            DeliveryStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Scheduled => "Запланирована",
            DeliveryStatus::InTransit => "В пути",
            DeliveryStatus::Delivered => "Доставлена",
            DeliveryStatus::Cancelled => "Отменена",
            DeliveryStatus::Unknown => "—",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Доставка готовой продукции клиенту
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: i64,
    pub reference_number: String,

    pub product_id: i64,
    #[serde(default)]
    pub product: Option<Product>,

    /// Склад отгрузки
    pub warehouse_id: i64,
    #[serde(default)]
    pub warehouse: Option<Warehouse>,

    #[serde(default)]
    pub driver_id: Option<i64>,
    #[serde(default)]
    pub driver: Option<Driver>,

    pub customer_name: String,
    #[serde(default)]
    pub destination: Option<String>,

    pub quantity: f64,

    /// Дата доставки (YYYY-MM-DD)
    pub delivery_date: String,

    pub status: DeliveryStatus,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryDto {
    pub product_id: i64,
    pub warehouse_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub quantity: f64,
    pub delivery_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDeliveryDto {
    pub warehouse_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    pub quantity: f64,
    pub delivery_date: String,
    pub status: DeliveryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
