//! Описание страницы списка: колонки, фильтры, заголовки.

use crate::shared::page_frame::PAGE_CAT_LIST;

use super::form_bridge::FormModel;
use super::lookups::{LookupKind, Lookups};
use super::query::SortSpec;

/// Колонка таблицы
pub struct Column<E> {
    pub label: &'static str,
    /// Ключ сортировки (имя поля API); None - колонка не сортируется
    pub sort_key: Option<&'static str>,
    pub render: fn(&E) -> String,
    /// CSS-класс бейджа для статусных колонок
    pub badge: Option<fn(&E) -> &'static str>,
    pub align_right: bool,
}

// derive would require E: Clone
impl<E> Clone for Column<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Column<E> {}

impl<E> Column<E> {
    pub const fn new(label: &'static str, render: fn(&E) -> String) -> Self {
        Self {
            label,
            sort_key: None,
            render,
            badge: None,
            align_right: false,
        }
    }

    pub const fn sortable(mut self, key: &'static str) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub const fn badge(mut self, class: fn(&E) -> &'static str) -> Self {
        self.badge = Some(class);
        self
    }

    pub const fn right(mut self) -> Self {
        self.align_right = true;
        self
    }
}

/// Откуда берутся значения фильтра
#[derive(Debug, Clone, Copy)]
pub enum FilterSource {
    /// Фиксированные пары `(value, label)`
    Fixed(fn() -> Vec<(String, String)>),
    /// Справочник, загружается при открытии страницы
    Lookup(LookupKind),
}

/// Фильтр-select над списком значений
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
    /// Имя query-параметра
    pub name: &'static str,
    pub label: &'static str,
    pub source: FilterSource,
}

impl FilterSpec {
    pub const fn fixed(name: &'static str, label: &'static str, options: fn() -> Vec<(String, String)>) -> Self {
        Self {
            name,
            label,
            source: FilterSource::Fixed(options),
        }
    }

    pub const fn lookup(name: &'static str, label: &'static str, kind: LookupKind) -> Self {
        Self {
            name,
            label,
            source: FilterSource::Lookup(kind),
        }
    }

    pub fn options(&self, lookups: &Lookups) -> Vec<(String, String)> {
        match self.source {
            FilterSource::Fixed(options) => options(),
            FilterSource::Lookup(kind) => lookups
                .options(kind)
                .into_iter()
                .map(|(id, name)| (id.to_string(), name))
                .collect(),
        }
    }
}

/// Справочники, нужные фильтрам страницы
pub fn filter_lookups(filters: &[FilterSpec]) -> Vec<LookupKind> {
    let mut kinds = Vec::new();
    for filter in filters {
        if let FilterSource::Lookup(kind) = filter.source {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    kinds
}

pub trait ListView: FormModel {
    const TITLE: &'static str;
    const PAGE_ID: &'static str;
    const PAGE_CATEGORY: &'static str = PAGE_CAT_LIST;
    const SEARCH_PLACEHOLDER: &'static str = "Поиск...";
    /// Заголовок формы создания
    const CREATE_TITLE: &'static str;

    fn columns() -> Vec<Column<Self>>;

    fn filters() -> Vec<FilterSpec> {
        Vec::new()
    }

    fn default_sort() -> Option<SortSpec> {
        None
    }

    /// Заголовок формы редактирования
    fn edit_title(&self) -> String;
}

/// Status badge classes shared by the entity pages
pub fn badge_class(tone: BadgeTone) -> &'static str {
    match tone {
        BadgeTone::Neutral => "badge badge--neutral",
        BadgeTone::Success => "badge badge--success",
        BadgeTone::Warning => "badge badge--warning",
        BadgeTone::Error => "badge badge--error",
        BadgeTone::Info => "badge badge--info",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Success,
    Warning,
    Error,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::Warehouse;

    fn statuses() -> Vec<(String, String)> {
        vec![("pending".into(), "Ожидает".into())]
    }

    #[test]
    fn test_filter_options_from_both_sources() {
        let lookups = Lookups {
            warehouses: vec![Warehouse { id: 3, name: "North".into(), location: None }],
            ..Lookups::default()
        };
        let fixed = FilterSpec::fixed("status", "Статус", statuses);
        let lookup = FilterSpec::lookup("warehouseId", "Склад", LookupKind::Warehouses);
        assert_eq!(fixed.options(&lookups), statuses());
        assert_eq!(lookup.options(&lookups), vec![("3".to_string(), "North".to_string())]);
        assert_eq!(
            filter_lookups(&[fixed, lookup, lookup]),
            vec![LookupKind::Warehouses]
        );
    }
}
