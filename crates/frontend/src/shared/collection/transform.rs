//! Local transform pipeline: search, stable sort and page slicing over
//! already-fetched records.

use crate::shared::list_utils::{filter_list, sort_list, Searchable, Sortable};

use super::query::SortSpec;

/// Search then stable sort. An empty term keeps every record.
pub fn transform<T>(records: Vec<T>, search: &str, sort: Option<&SortSpec>) -> Vec<T>
where
    T: Searchable + Sortable,
{
    let mut records = filter_list(records, search);
    if let Some(sort) = sort {
        sort_list(&mut records, &sort.key, sort.direction.is_ascending());
    }
    records
}

/// Records of 1-based `page`; an out-of-range page yields an empty slice.
pub fn paginate<T>(records: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= records.len() {
        return &[];
    }
    let end = (start + page_size).min(records.len());
    &records[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::SortValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: usize,
        tag: String,
    }

    impl Searchable for Item {
        fn search_fields(&self) -> Vec<String> {
            vec![self.tag.clone()]
        }
    }

    impl Sortable for Item {
        fn sort_value(&self, field: &str) -> SortValue {
            match field {
                "tag" => SortValue::text(&self.tag),
                _ => SortValue::Empty,
            }
        }
    }

    fn items(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                tag: if id % 2 == 0 { "even".into() } else { "odd".into() },
            })
            .collect()
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let data = items(25);
        let page = paginate(&data, 3, 10);
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].id, 21);
        assert_eq!(page[4].id, 25);
        assert!(paginate(&data, 4, 10).is_empty());
    }

    #[test]
    fn test_transform_search_then_sort() {
        let out = transform(items(6), "EVEN", Some(&SortSpec::desc("tag")));
        let ids: Vec<usize> = out.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 4, 6]);
    }

    #[test]
    fn test_transform_empty_search_is_identity() {
        assert_eq!(transform(items(4), "", None), items(4));
    }
}
