//! Форма доставки

mod view_model;
