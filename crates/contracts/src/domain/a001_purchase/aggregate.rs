use crate::domain::common::{Product, Supplier, UserProfile, Warehouse};
use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// Статус закупки. Переходы выполняет сервер.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    Pending,
    Approved,
    Received,
    Rejected,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl PurchaseStatus {
    pub const ALL: [PurchaseStatus; 5] = [
        PurchaseStatus::Pending,
        PurchaseStatus::Approved,
        PurchaseStatus::Received,
        PurchaseStatus::Rejected,
        PurchaseStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Approved => "approved",
            PurchaseStatus::Received => "received",
            PurchaseStatus::Rejected => "rejected",
            PurchaseStatus::Cancelled => "cancelled",
            PurchaseStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "Ожидает",
            PurchaseStatus::Approved => "Утверждена",
            PurchaseStatus::Received => "Получена",
            PurchaseStatus::Rejected => "Отклонена",
            PurchaseStatus::Cancelled => "Отменена",
            PurchaseStatus::Unknown => "—",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Закупка сырья у поставщика
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: i64,

    /// Номер документа, присваивается сервером (напр. "PUR-2024-00017")
    pub reference_number: String,

    pub supplier_id: i64,
    #[serde(default)]
    pub supplier: Option<Supplier>,

    pub product_id: i64,
    #[serde(default)]
    pub product: Option<Product>,

    pub warehouse_id: i64,
    #[serde(default)]
    pub warehouse: Option<Warehouse>,

    /// Вес партии, кг
    pub weight: f64,

    pub price_per_unit: f64,

    /// Итоговая стоимость, рассчитывается сервером
    #[serde(default)]
    pub total_cost: Option<f64>,

    pub status: PurchaseStatus,

    /// Дата закупки (YYYY-MM-DD)
    pub purchase_date: String,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub created_by: Option<UserProfile>,

    pub created_at: String,

    /// Метка мягкого удаления
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl Purchase {
    /// После утверждения сервер не даёт менять поставщика и товар
    pub fn is_locked(&self) -> bool {
        matches!(
            self.status,
            PurchaseStatus::Approved | PurchaseStatus::Received
        )
    }
}

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseDto {
    pub supplier_id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub weight: f64,
    pub price_per_unit: f64,
    pub purchase_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchaseDto {
    pub supplier_id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub weight: f64,
    pub price_per_unit: f64,
    pub purchase_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_relations() {
        let value = json!({
            "id": 5,
            "referenceNumber": "PUR-2024-00005",
            "supplierId": 2,
            "supplier": { "id": 2, "name": "Agro LLC" },
            "productId": 9,
            "product": { "id": 9, "name": "Cocoa beans", "unit": "kg" },
            "warehouseId": 1,
            "weight": 1250.5,
            "pricePerUnit": 3.2,
            "status": "approved",
            "purchaseDate": "2024-05-02",
            "createdAt": "2024-05-02T10:00:00Z"
        });
        let purchase: Purchase = serde_json::from_value(value).unwrap();
        assert_eq!(purchase.supplier.unwrap().name, "Agro LLC");
        assert!(purchase.warehouse.is_none());
        assert_eq!(purchase.status, PurchaseStatus::Approved);
        assert!(purchase.deleted_at.is_none());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: PurchaseStatus = serde_json::from_value(json!("on_hold")).unwrap();
        assert_eq!(status, PurchaseStatus::Unknown);
    }

    #[test]
    fn test_create_dto_omits_empty_notes() {
        let dto = CreatePurchaseDto {
            supplier_id: 1,
            product_id: 2,
            warehouse_id: 3,
            weight: 10.0,
            price_per_unit: 2.5,
            purchase_date: "2024-01-01".into(),
            notes: None,
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["pricePerUnit"], json!(2.5));
        assert!(value.get("notes").is_none());
    }
}
