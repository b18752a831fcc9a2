use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl FilterValue {
    pub fn to_param(&self) -> String {
        match self {
            FilterValue::Text(s) => s.clone(),
            FilterValue::Number(n) => n.to_string(),
            FilterValue::Flag(b) => b.to_string(),
        }
    }

    /// Значение из `<select>`: пустая строка означает "фильтр не задан"
    pub fn from_input(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if let Ok(n) = value.parse::<i64>() {
            return Some(FilterValue::Number(n));
        }
        match value {
            "true" => Some(FilterValue::Flag(true)),
            "false" => Some(FilterValue::Flag(false)),
            _ => Some(FilterValue::Text(value.to_string())),
        }
    }
}

/// Total pages for a collection, never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Query State: parameters that determine what the list requests and shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub filters: BTreeMap<String, FilterValue>,
    pub sort: Option<SortSpec>,
    pub include_deleted: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            include_deleted: false,
        }
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_filter(mut self, name: &str, value: FilterValue) -> Self {
        self.filters.insert(name.to_string(), value);
        self
    }

    pub fn filter(&self, name: &str) -> Option<&FilterValue> {
        self.filters.get(name)
    }

    /// `None` removes the filter. Any change resets to the first page.
    pub fn set_filter(&mut self, name: &str, value: Option<FilterValue>) {
        match value {
            Some(v) => {
                self.filters.insert(name.to_string(), v);
            }
            None => {
                self.filters.remove(name);
            }
        }
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Returns `false` when the term did not change.
    pub fn set_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if self.search == term {
            return false;
        }
        self.search = term.to_string();
        self.page = 1;
        true
    }

    /// Same key toggles ascending/descending, a new key starts ascending.
    /// The page is kept.
    pub fn set_sort(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.key == key => Some(SortSpec {
                key: current.key,
                direction: match current.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            }),
            _ => Some(SortSpec::asc(key)),
        };
    }

    /// No-op outside `[1, total_pages]`; returns whether the page changed.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page < 1 || page > total_pages.max(1) || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_include_deleted(&mut self, include: bool) {
        self.include_deleted = include;
        self.page = 1;
    }

    /// Clamps the current page into `[1, total_pages]`; returns whether it moved.
    pub fn clamp_page(&mut self, total_pages: usize) -> bool {
        let clamped = self.page.clamp(1, total_pages.max(1));
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    pub fn to_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("page".to_string(), self.page.to_string());
        params.insert("pageSize".to_string(), self.page_size.to_string());
        if !self.search.is_empty() {
            params.insert("search".to_string(), self.search.clone());
        }
        if let Some(sort) = &self.sort {
            params.insert("sortBy".to_string(), sort.key.clone());
            params.insert("sortOrder".to_string(), sort.direction.as_str().to_string());
        }
        if self.include_deleted {
            params.insert("includeDeleted".to_string(), "true".to_string());
        }
        for (name, value) in &self.filters {
            params.insert(name.clone(), value.to_param());
        }
        params
    }

    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(&self.to_params()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_bounds() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(7, 0), 7);
    }

    #[test]
    fn test_set_page_rejects_out_of_range() {
        let mut q = ListQuery::new(10);
        assert!(!q.set_page(0, 3));
        assert!(!q.set_page(4, 3));
        assert_eq!(q.page, 1);
        assert!(q.set_page(3, 3));
        assert_eq!(q.page, 3);
    }

    #[test]
    fn test_filter_resets_page() {
        let mut q = ListQuery::new(10);
        q.page = 4;
        q.set_filter("status", Some(FilterValue::Text("approved".into())));
        assert_eq!(q.page, 1);
        q.page = 2;
        q.set_filter("status", None);
        assert_eq!(q.page, 1);
        assert!(q.filters.is_empty());
    }

    #[test]
    fn test_sort_toggles_and_keeps_page() {
        let mut q = ListQuery::new(10);
        q.page = 2;
        q.set_sort("weight");
        assert_eq!(q.sort, Some(SortSpec::asc("weight")));
        q.set_sort("weight");
        assert_eq!(q.sort, Some(SortSpec::desc("weight")));
        q.set_sort("weight");
        assert_eq!(q.sort, Some(SortSpec::asc("weight")));
        q.set_sort("status");
        assert_eq!(q.sort, Some(SortSpec::asc("status")));
        assert_eq!(q.page, 2);
    }

    #[test]
    fn test_search_resets_page_only_on_change() {
        let mut q = ListQuery::new(10);
        q.page = 3;
        assert!(!q.set_search("  "));
        assert_eq!(q.page, 3);
        assert!(q.set_search(" cocoa "));
        assert_eq!(q.search, "cocoa");
        assert_eq!(q.page, 1);
    }

    #[test]
    fn test_params() {
        let mut q = ListQuery::new(25)
            .with_filter("warehouseId", FilterValue::Number(3))
            .with_sort(Some(SortSpec::desc("purchaseDate")));
        q.set_search("PUR-01");
        let params = q.to_params();
        assert_eq!(params["page"], "1");
        assert_eq!(params["pageSize"], "25");
        assert_eq!(params["search"], "PUR-01");
        assert_eq!(params["sortBy"], "purchaseDate");
        assert_eq!(params["sortOrder"], "desc");
        assert_eq!(params["warehouseId"], "3");
        assert!(!params.contains_key("includeDeleted"));

        let qs = q.to_query_string();
        assert!(qs.contains("pageSize=25"));
        assert!(qs.contains("warehouseId=3"));
    }

    #[test]
    fn test_filter_value_from_input() {
        assert_eq!(FilterValue::from_input(""), None);
        assert_eq!(FilterValue::from_input("12"), Some(FilterValue::Number(12)));
        assert_eq!(FilterValue::from_input("true"), Some(FilterValue::Flag(true)));
        assert_eq!(
            FilterValue::from_input("in_transit"),
            Some(FilterValue::Text("in_transit".into()))
        );
    }
}
