use crate::domain::common::{Product, Warehouse};
use serde::{Deserialize, Serialize};

/// Тип движения остатков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Inbound,
    Outbound,
    Transfer,
    Adjustment,
    #[serde(other)]
    Unknown,
}

impl MovementType {
    pub const ALL: [MovementType; 4] = [
        MovementType::Inbound,
        MovementType::Outbound,
        MovementType::Transfer,
        MovementType::Adjustment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Inbound => "inbound",
            MovementType::Outbound => "outbound",
            MovementType::Transfer => "transfer",
            MovementType::Adjustment => "adjustment",
            MovementType::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MovementType::Inbound => "Приход",
            MovementType::Outbound => "Расход",
            MovementType::Transfer => "Перемещение",
            MovementType::Adjustment => "Корректировка",
            MovementType::Unknown => "—",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

/// Движение остатков между складами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: i64,
    pub reference_number: String,

    pub product_id: i64,
    #[serde(default)]
    pub product: Option<Product>,

    #[serde(default)]
    pub from_warehouse_id: Option<i64>,
    #[serde(default)]
    pub from_warehouse: Option<Warehouse>,

    #[serde(default)]
    pub to_warehouse_id: Option<i64>,
    #[serde(default)]
    pub to_warehouse: Option<Warehouse>,

    pub quantity: f64,
    pub movement_type: MovementType,

    /// Дата движения (YYYY-MM-DD)
    pub movement_date: String,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockMovementDto {
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_warehouse_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_warehouse_id: Option<i64>,
    pub quantity: f64,
    pub movement_type: MovementType,
    pub movement_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockMovementDto {
    pub quantity: f64,
    pub movement_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
