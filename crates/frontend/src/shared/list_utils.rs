/// Универсальные утилиты для работы со списками (поиск, сортировка, UI компоненты)
use leptos::prelude::*;
use std::cmp::Ordering;
use wasm_bindgen::JsCast;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Поля, по которым идёт поиск (то, что видит пользователь в таблице)
    fn search_fields(&self) -> Vec<String>;

    /// Регистронезависимое вхождение подстроки хотя бы в одно поле
    fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Значение поля для сравнения при сортировке
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    /// Отсутствующее значение, сортируется как пустая строка
    Empty,
}

impl SortValue {
    pub fn text(value: impl AsRef<str>) -> Self {
        SortValue::Text(value.as_ref().to_string())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map(SortValue::text).unwrap_or(SortValue::Empty)
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        value.map(SortValue::Number).unwrap_or(SortValue::Empty)
    }

    /// Текст сравнивается как есть, без приведения регистра
    fn as_text(&self) -> String {
        match self {
            SortValue::Text(s) => s.clone(),
            SortValue::Number(n) => n.to_string(),
            SortValue::Empty => String::new(),
        }
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (SortValue::Empty, SortValue::Empty) => Ordering::Equal,
            (SortValue::Empty, _) => {
                if other.as_text().is_empty() {
                    Ordering::Equal
                } else {
                    Ordering::Less
                }
            }
            (_, SortValue::Empty) => other.compare(self).reverse(),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Значение указанного поля; неизвестное поле даёт `SortValue::Empty`
    fn sort_value(&self, field: &str) -> SortValue;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        self.sort_value(field).compare(&other.sort_value(field))
    }
}

/// Сортирует список по указанному полю.
///
/// Сортировка стабильная: записи с равными ключами сохраняют исходный порядок
/// в обоих направлениях.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Фильтрует список по поисковому запросу
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.trim().is_empty() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Байтовые диапазоны исходного текста, совпавшие с фильтром без учёта регистра.
///
/// Строчная форма символа может иметь другую длину (`ẞ` → `ß`, `İ` → `i̇`),
/// поэтому позиции переводятся обратно посимвольно и всегда лежат на границах
/// символов исходной строки.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut lowered = String::with_capacity(text.len());
    // origin[i] - начало исходного символа для i-го байта lowered
    let mut origin = Vec::with_capacity(text.len());
    for (pos, ch) in text.char_indices() {
        for lower in ch.to_lowercase() {
            origin.extend(std::iter::repeat(pos).take(lower.len_utf8()));
            lowered.push(lower);
        }
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut from = 0;
    while let Some(found) = lowered[from..].find(&needle) {
        let start = from + found;
        let end = start + needle.len();
        from = end;

        let orig_start = origin[start];
        let last = origin[end - 1];
        let orig_end = last + text[last..].chars().next().map_or(0, char::len_utf8);
        if ranges.last().is_some_and(|&(_, prev_end)| orig_start < prev_end) {
            continue;
        }
        ranges.push((orig_start, orig_end));
    }
    ranges
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(view! {
            <mark class="search-highlight">{text[start..end].to_string()}</mark>
        }.into_any());
        last_pos = end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
    /// Задержка перед применением, мс
    #[prop(optional, default = 300)]
    debounce_ms: i32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    let debounce_timeout = StoredValue::new(None::<i32>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());

        let Some(window) = web_sys::window() else {
            on_change.run(new_value);
            return;
        };

        if let Some(timeout_id) = debounce_timeout.get_value() {
            window.clear_timeout_with_handle(timeout_id);
        }

        let closure = wasm_bindgen::closure::Closure::once_into_js(move || {
            on_change.run(new_value);
        });

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.unchecked_ref::<js_sys::Function>(),
            debounce_ms,
        ) {
            Ok(timeout_id) => debounce_timeout.set_value(Some(timeout_id)),
            Err(_) => log::warn!("setTimeout failed, search not debounced"),
        }
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class=move || if is_filter_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Очистить">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS класс индикатора сортировки
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
        weight: Option<f64>,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.to_string()]
        }
    }

    impl Sortable for Row {
        fn sort_value(&self, field: &str) -> SortValue {
            match field {
                "name" => SortValue::text(self.name),
                "weight" => SortValue::opt_number(self.weight),
                _ => SortValue::Empty,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, name: "beta", weight: Some(2.0) },
            Row { id: 2, name: "Alpha", weight: None },
            Row { id: 3, name: "beta", weight: Some(10.0) },
            Row { id: 4, name: "gamma", weight: Some(2.0) },
        ]
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut data = rows();
        sort_list(&mut data, "name", true);
        assert_eq!(ids(&data), vec![2, 1, 3, 4]);
        sort_list(&mut data, "name", false);
        assert_eq!(ids(&data), vec![4, 1, 3, 2]);
        sort_list(&mut data, "name", true);
        assert_eq!(ids(&data), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_missing_values_sort_first() {
        let mut data = rows();
        sort_list(&mut data, "weight", true);
        assert_eq!(ids(&data), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(
            SortValue::Number(10.0).compare(&SortValue::Number(9.0)),
            Ordering::Greater
        );
        assert_eq!(SortValue::Empty.compare(&SortValue::text("")), Ordering::Equal);
        assert_eq!(SortValue::text("a").compare(&SortValue::Empty), Ordering::Greater);
    }

    #[test]
    fn test_text_sorts_by_code_point() {
        let mut data = vec![
            Row { id: 1, name: "b", weight: None },
            Row { id: 2, name: "A", weight: None },
            Row { id: 3, name: "a", weight: None },
            Row { id: 4, name: "B", weight: None },
        ];
        sort_list(&mut data, "name", true);
        let names: Vec<&str> = data.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["A", "B", "a", "b"]);
    }

    #[test]
    fn test_match_ranges_stay_on_char_boundaries() {
        let text = "ẞİ";
        let ranges = match_ranges(text, "i");
        assert_eq!(ranges, vec![(3, 5)]);
        assert_eq!(&text[3..5], "İ");
        assert_eq!(match_ranges("ẞ", "ß"), vec![(0, 3)]);
    }

    #[test]
    fn test_match_ranges_find_every_occurrence() {
        assert_eq!(match_ranges("Beta beta", "BETA"), vec![(0, 4), (5, 9)]);
        assert_eq!(match_ranges("Склад Север", "север"), vec![(11, 21)]);
        assert!(match_ranges("gamma", "  ").is_empty());
        assert!(match_ranges("gamma", "x").is_empty());
    }

    #[test]
    fn test_filter_case_insensitive() {
        let found = filter_list(rows(), "ALP");
        assert_eq!(ids(&found), vec![2]);
        assert_eq!(filter_list(rows(), "  ").len(), 4);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("weight", "name", true), " ⇅");
    }
}
