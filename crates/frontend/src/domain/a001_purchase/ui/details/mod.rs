//! Форма закупки: черновик ↔ DTO, подстановка цены по товару

mod view_model;
