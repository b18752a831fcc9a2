use crate::domain::common::{Product, Warehouse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ProductionStatus {
    pub const ALL: [ProductionStatus; 4] = [
        ProductionStatus::Planned,
        ProductionStatus::InProgress,
        ProductionStatus::Completed,
        ProductionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionStatus::Planned => "planned",
            ProductionStatus::InProgress => "in_progress",
            ProductionStatus::Completed => "completed",
            ProductionStatus::Cancelled => "cancelled",
            ProductionStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductionStatus::Planned => "Запланирована",
            ProductionStatus::InProgress => "В работе",
            ProductionStatus::Completed => "Завершена",
            ProductionStatus::Cancelled => "Отменена",
            ProductionStatus::Unknown => "—",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// Производственная партия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Production {
    pub id: i64,

    /// Номер партии, присваивается сервером
    pub batch_number: String,

    /// Выпускаемый продукт
    pub product_id: i64,
    #[serde(default)]
    pub product: Option<Product>,

    pub warehouse_id: i64,
    #[serde(default)]
    pub warehouse: Option<Warehouse>,

    /// Израсходовано сырья
    pub input_quantity: f64,

    /// Выпущено продукции
    #[serde(default)]
    pub output_quantity: Option<f64>,

    /// Себестоимость партии, рассчитывается сервером
    #[serde(default)]
    pub total_cost: Option<f64>,

    pub status: ProductionStatus,

    /// Дата производства (YYYY-MM-DD)
    pub production_date: String,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductionDto {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub input_quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_quantity: Option<f64>,
    pub production_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductionDto {
    pub warehouse_id: i64,
    pub input_quantity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_quantity: Option<f64>,
    pub production_date: String,
    pub status: ProductionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
