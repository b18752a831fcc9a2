use crate::domain::common::{Product, Warehouse};
use serde::{Deserialize, Serialize};

/// Способ утилизации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalMethod {
    Landfill,
    Recycling,
    Incineration,
    Composting,
    #[serde(other)]
    Other,
}

impl DisposalMethod {
    pub const ALL: [DisposalMethod; 5] = [
        DisposalMethod::Landfill,
        DisposalMethod::Recycling,
        DisposalMethod::Incineration,
        DisposalMethod::Composting,
        DisposalMethod::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisposalMethod::Landfill => "landfill",
            DisposalMethod::Recycling => "recycling",
            DisposalMethod::Incineration => "incineration",
            DisposalMethod::Composting => "composting",
            DisposalMethod::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisposalMethod::Landfill => "Полигон",
            DisposalMethod::Recycling => "Переработка",
            DisposalMethod::Incineration => "Сжигание",
            DisposalMethod::Composting => "Компостирование",
            DisposalMethod::Other => "Другое",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalStatus {
    Pending,
    Approved,
    Completed,
    #[serde(other)]
    Unknown,
}

impl DisposalStatus {
    pub const ALL: [DisposalStatus; 3] = [
        DisposalStatus::Pending,
        DisposalStatus::Approved,
        DisposalStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisposalStatus::Pending => "pending",
            DisposalStatus::Approved => "approved",
            DisposalStatus::Completed => "completed",
            DisposalStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisposalStatus::Pending => "Ожидает",
            DisposalStatus::Approved => "Утверждена",
            DisposalStatus::Completed => "Выполнена",
            DisposalStatus::Unknown => "—",
        }
    }
}

/// Списание и утилизация отходов/брака
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disposal {
    pub id: i64,
    pub reference_number: String,

    pub product_id: i64,
    #[serde(default)]
    pub product: Option<Product>,

    pub warehouse_id: i64,
    #[serde(default)]
    pub warehouse: Option<Warehouse>,

    pub quantity: f64,
    pub reason: String,
    pub method: DisposalMethod,
    pub status: DisposalStatus,

    /// Дата утилизации (YYYY-MM-DD)
    pub disposal_date: String,

    #[serde(default)]
    pub notes: Option<String>,

    pub created_at: String,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDisposalDto {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: f64,
    pub reason: String,
    pub method: DisposalMethod,
    pub disposal_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDisposalDto {
    pub quantity: f64,
    pub reason: String,
    pub method: DisposalMethod,
    pub disposal_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
