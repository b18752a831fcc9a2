//! Форма движения товара. Тип и склады задаются только при создании.

mod view_model;
