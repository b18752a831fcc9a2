//! Сортируемая ячейка заголовка таблицы
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Дата"
//!     sort_key="purchaseDate"
//!     current_sort=Signal::derive(move || state.with(|s| s.query.sort.clone()))
//!     on_sort=Callback::new(move |key| toggle_sort(key))
//! />
//! ```

use crate::shared::collection::SortSpec;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Имя поля API, по которому сортируем
    sort_key: &'static str,

    #[prop(into)]
    current_sort: Signal<Option<SortSpec>>,

    on_sort: Callback<&'static str>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let current_key = move || current_sort.with(|s| s.as_ref().map(|s| s.key.clone()).unwrap_or_default());
    let ascending = move || current_sort.with(|s| s.as_ref().map(|s| s.direction.is_ascending()).unwrap_or(true));

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_key)
            >
                {label}
                <span class=move || get_sort_class(&current_key(), sort_key)>
                    {move || get_sort_indicator(&current_key(), sort_key, ascending())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
