pub mod a001_purchase;
pub mod a002_delivery;
pub mod a003_disposal;
pub mod a004_production;
pub mod a005_stock_movement;
pub mod common;
