//! Generic list page: every entity page is `collection_page::<Entity>()`.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::config::AppConfig;
use crate::shared::http::use_api_client;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::modal::{ConfirmDialog, Modal};
use crate::shared::notifications::{use_toasts, Notifier};
use crate::shared::page_frame::PageFrame;
use crate::shared::state::form_state::FormMode;

use super::api::RestCollection;
use super::controller::{CollectionController, EditorState};
use super::form_bridge::{FieldKind, FieldSpec};
use super::lookups::{load_lookups, Lookups};
use super::query::{FilterValue, ListQuery};
use super::state::ListState;
use super::view::{filter_lookups, Column, FilterSpec, ListView};

type PageController<E> =
    CollectionController<E, RestCollection<E>, RwSignal<ListState<E>>, RwSignal<EditorState<E>>>;
type StoredController<E> = StoredValue<PageController<E>, LocalStorage>;

/// Runs an async controller action; silently skipped once the page is gone.
fn spawn_with<E, F, Fut>(ctrl: StoredController<E>, action: F)
where
    E: ListView,
    F: FnOnce(PageController<E>) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    if let Some(ctrl) = ctrl.try_get_value() {
        spawn_local(action(ctrl));
    }
}

pub fn collection_page<E: ListView>() -> impl IntoView {
    let config = use_context::<AppConfig>().unwrap_or_default();
    let Some(client) = use_api_client() else {
        log::error!("API client missing from context");
        return view! { <div class="alert alert--error">"API недоступен"</div> }.into_any();
    };

    // Requests of this page die with it
    let abort = web_sys::AbortController::new().ok();
    let client = match &abort {
        Some(controller) => client.with_abort_signal(controller.signal()),
        None => client,
    };
    let abort = StoredValue::new_local(abort);
    on_cleanup(move || {
        abort.try_with_value(|controller| {
            if let Some(controller) = controller {
                controller.abort();
            }
        });
    });

    let toasts = use_toasts();
    let filters = E::filters();
    let lookups = RwSignal::new(Lookups::default());
    let lookup_kinds = filter_lookups(&filters);
    if !lookup_kinds.is_empty() {
        let source = client.clone();
        spawn_local(async move {
            match load_lookups(&source, &lookup_kinds).await {
                Ok(loaded) => {
                    lookups.try_set(loaded);
                }
                Err(e) if e.is_aborted() => {}
                Err(e) => toasts.error(&e.user_message()),
            }
        });
    }

    let query = ListQuery::new(config.default_page_size).with_sort(E::default_sort());
    let state = RwSignal::new(ListState::<E>::new(query, config.error_policy));
    let editor = RwSignal::new(EditorState::<E>::default());
    let ctrl: StoredController<E> = StoredValue::new_local(CollectionController::new(
        RestCollection::new(client),
        state,
        editor,
        Rc::new(toasts),
    ));

    spawn_with(ctrl, |c| async move {
        c.load().await;
    });

    let loading = Signal::derive(move || state.with(|s| s.loading));
    let submitting = Signal::derive(move || state.with(|s| s.is_submitting));
    let search = Signal::derive(move || state.with(|s| s.query.search.clone()));

    let on_search = Callback::new(move |term: String| {
        spawn_with(ctrl, move |c| async move { c.set_search(term).await });
    });
    let on_sort = Callback::new(move |key: &'static str| {
        spawn_with(ctrl, move |c| async move { c.set_sort(key).await });
    });
    let on_page = Callback::new(move |page: usize| {
        spawn_with(ctrl, move |c| async move { c.set_page(page).await });
    });
    let on_page_size = Callback::new(move |size: usize| {
        spawn_with(ctrl, move |c| async move { c.set_page_size(size).await });
    });
    let refresh = move || {
        spawn_with(ctrl, |c| async move {
            c.load().await;
        })
    };
    let open_create = move || {
        spawn_with(ctrl, |c| async move { c.open_create().await });
    };

    let columns = E::columns();
    let header_columns = columns.clone();
    let colspan = empty_row_colspan(&columns);

    view! {
        <PageFrame page_id=E::PAGE_ID category=E::PAGE_CATEGORY>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{E::TITLE}</h1>
                    <Badge>{move || state.with(|s| s.display_total()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| open_create()
                        disabled=submitting
                    >
                        {icon("plus")}
                        " Новый"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Загрузка..." } else { " Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            {icon("filter")}
                            <span class="filter-panel__title">"Фильтры"</span>
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || state.with(|s| s.query.page))
                                total_pages=Signal::derive(move || state.with(|s| s.total_pages()))
                                total_count=Signal::derive(move || state.with(|s| s.display_total()))
                                page_size=Signal::derive(move || state.with(|s| s.query.page_size))
                                on_page_change=on_page
                                on_page_size_change=on_page_size
                                page_size_options=config.page_size_options.clone()
                                disabled=loading
                            />
                        </div>
                    </div>

                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div style="flex: 1; max-width: 320px;">
                                <SearchInput
                                    value=search
                                    on_change=on_search
                                    placeholder=E::SEARCH_PLACEHOLDER
                                    debounce_ms=config.search_debounce_ms as i32
                                />
                            </div>
                            {filters
                                .into_iter()
                                .map(|spec| filter_select(spec, lookups, state, ctrl))
                                .collect_view()}
                            {E::SOFT_DELETE.then(|| deleted_toggle(state, ctrl))}
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| spawn_with(ctrl, |c| async move { c.clear_filters().await })
                                disabled=Signal::derive(move || state.with(|s| s.query.filters.is_empty()))
                            >
                                "Сбросить"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header_columns
                                    .into_iter()
                                    .map(|column| header_cell(column, state, on_sort))
                                    .collect_view()}
                                <TableHeaderCell min_width=90.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let (rows, term) = state.with(|s| (s.visible(), s.query.search.clone()));
                                if rows.is_empty() {
                                    let text = if loading.get() { "Загрузка..." } else { "Нет записей" };
                                    let colspan = colspan.clone();
                                    return view! {
                                        <TableRow>
                                            <TableCell attr:colspan={colspan.clone()}>
                                                <span class="table__empty">{text}</span>
                                            </TableCell>
                                        </TableRow>
                                    }
                                    .into_any();
                                }
                                rows.into_iter()
                                    .map(|record| record_row(record, &columns, &term, ctrl, submitting))
                                    .collect_view()
                                    .into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>

                {move || editor.with(|ed| ed.form.is_open()).then(|| entity_form(editor, ctrl))}

                {move || {
                    state
                        .with(|s| s.pending_delete().map(|r| r.edit_title()))
                        .map(|title| {
                            view! {
                                <ConfirmDialog
                                    title="Удаление записи"
                                    message=format!("Удалить «{}»? Действие необратимо.", title)
                                    busy=submitting
                                    on_confirm=Callback::new(move |_| {
                                        spawn_with(ctrl, |c| async move {
                                            let _ = c.confirm_delete().await;
                                        })
                                    })
                                    on_cancel=Callback::new(move |_| {
                                        if let Some(c) = ctrl.try_get_value() {
                                            c.cancel_delete();
                                        }
                                    })
                                />
                            }
                        })
                }}
            </div>
        </PageFrame>
    }
    .into_any()
}

fn header_cell<E: ListView>(
    column: Column<E>,
    state: RwSignal<ListState<E>>,
    on_sort: Callback<&'static str>,
) -> AnyView {
    let align = if column.align_right { "right" } else { "left" };
    match column.sort_key {
        Some(key) => view! {
            <SortableHeaderCell
                label=column.label
                sort_key=key
                current_sort=Signal::derive(move || state.with(|s| s.query.sort.clone()))
                on_sort=on_sort
                align=align
            />
        }
        .into_any(),
        None => view! { <TableHeaderCell min_width=100.0>{column.label}</TableHeaderCell> }.into_any(),
    }
}

/// Пустая строка таблицы занимает все колонки и колонку действий
fn empty_row_colspan<E>(columns: &[Column<E>]) -> String {
    (columns.len() + 1).to_string()
}

fn record_row<E: ListView>(
    record: E,
    columns: &[Column<E>],
    search: &str,
    ctrl: StoredController<E>,
    submitting: Signal<bool>,
) -> impl IntoView {
    let id = record.id();
    let deleted = record.is_deleted();
    let cells = columns
        .iter()
        .map(|column| {
            let text = (column.render)(&record);
            let content = match column.badge {
                Some(class) => view! { <span class=class(&record)>{text}</span> }.into_any(),
                None => highlight_matches(&text, search),
            };
            let style = if column.align_right { "text-align: right;" } else { "" };
            view! {
                <TableCell attr:style=style>
                    <TableCellLayout truncate=true>{content}</TableCellLayout>
                </TableCell>
            }
        })
        .collect_view();

    let actions = if deleted {
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| spawn_with(ctrl, move |c| async move {
                    let _ = c.restore(id).await;
                })
                disabled=submitting
                attr:title="Восстановить"
            >
                {icon("restore")}
            </Button>
        }
        .into_any()
    } else {
        view! {
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| spawn_with(ctrl, move |c| async move { c.open_edit(id).await })
                disabled=submitting
                attr:title="Редактировать"
            >
                {icon("edit")}
            </Button>
            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| {
                    if let Some(c) = ctrl.try_get_value() {
                        c.request_delete(id);
                    }
                }
                disabled=submitting
                attr:title="Удалить"
            >
                {icon("trash")}
            </Button>
        }
        .into_any()
    };

    view! {
        <TableRow class=if deleted { "table__row--deleted" } else { "" }>
            {cells}
            <TableCell>{actions}</TableCell>
        </TableRow>
    }
}

fn filter_select<E: ListView>(
    spec: FilterSpec,
    lookups: RwSignal<Lookups>,
    state: RwSignal<ListState<E>>,
    ctrl: StoredController<E>,
) -> impl IntoView {
    let name = spec.name;
    let current = move || {
        state.with(|s| s.query.filter(name).map(FilterValue::to_param).unwrap_or_default())
    };
    view! {
        <div class="form__group form__group--inline">
            <Label>{spec.label}</Label>
            <select
                class="filter-select"
                prop:value=current
                on:change=move |ev| {
                    let value = FilterValue::from_input(&event_target_value(&ev));
                    spawn_with(ctrl, move |c| async move { c.set_filter(name, value).await });
                }
            >
                <option value="">"Все"</option>
                {move || {
                    lookups
                        .with(|l| spec.options(l))
                        .into_iter()
                        .map(|(value, label)| {
                            let selected_value = value.clone();
                            view! {
                                <option value=value selected=move || current() == selected_value>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </div>
    }
}

fn deleted_toggle<E: ListView>(state: RwSignal<ListState<E>>, ctrl: StoredController<E>) -> impl IntoView {
    view! {
        <label class="checkbox-label">
            <input
                type="checkbox"
                prop:checked=move || state.with(|s| s.query.include_deleted)
                on:change=move |ev| {
                    let include = event_target_checked(&ev);
                    spawn_with(ctrl, move |c| async move { c.set_include_deleted(include).await });
                }
            />
            " Показать удалённые"
        </label>
    }
}

// ============================================================================
// Form
// ============================================================================

fn entity_form<E: ListView>(editor: RwSignal<EditorState<E>>, ctrl: StoredController<E>) -> impl IntoView {
    let submitting = Signal::derive(move || editor.with(|ed| ed.form.is_submitting()));
    let title = Signal::derive(move || {
        editor.with(|ed| match (ed.form.mode(), ed.editing.as_ref()) {
            (Some(FormMode::Edit(_)), Some(record)) => record.edit_title(),
            _ => E::CREATE_TITLE.to_string(),
        })
    });
    let close = Callback::new(move |_| {
        if let Some(c) = ctrl.try_get_value() {
            c.close_form();
        }
    });
    let submit = move || {
        spawn_with(ctrl, |c| async move {
            let _ = c.submit().await;
        })
    };
    let fields = editor.with_untracked(|ed| ed.visible_fields());

    view! {
        <Modal
            title=title
            on_close=close
            footer=std::sync::Arc::new(move || {
                view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| close.run(())
                        disabled=submitting
                    >
                        "Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| submit()
                        disabled=submitting
                    >
                        {move || if submitting.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                }
                .into_any()
            })
        >
            {move || editor.with(|ed| ed.form.error().map(String::from)).map(|e| view! { <div class="alert alert--error">{e}</div> })}
            {move || editor.with(|ed| ed.lookups_error.clone()).map(|e| view! { <div class="alert alert--warning">{e}</div> })}
            {move || editor.with(|ed| ed.lookups_loading).then(|| view! { <div class="form__hint">"Загрузка справочников..."</div> })}

            <form class="form" on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }>
                {fields.into_iter().map(|spec| form_field(spec, editor, ctrl, submitting)).collect_view()}
            </form>
        </Modal>
    }
}

fn form_field<E: ListView>(
    spec: FieldSpec,
    editor: RwSignal<EditorState<E>>,
    ctrl: StoredController<E>,
    submitting: Signal<bool>,
) -> impl IntoView {
    let name = spec.name;
    let value = move || editor.with(|ed| ed.bridge.draft().get(name).to_string());
    let error = move || editor.with(|ed| ed.bridge.field_error(name).map(String::from));
    let disabled = move || submitting.get() || editor.with(|ed| ed.is_locked(name));
    let on_value = move |value: String| {
        spawn_with(ctrl, move |c| async move { c.on_field_change(name.to_string(), value).await });
    };

    let input = match spec.kind {
        FieldKind::Text | FieldKind::Number | FieldKind::Date | FieldKind::Password => {
            let input_type = match spec.kind {
                FieldKind::Number => "number",
                FieldKind::Date => "date",
                FieldKind::Password => "password",
                _ => "text",
            };
            view! {
                <input
                    class="form__input"
                    type=input_type
                    step=(input_type == "number").then_some("any")
                    prop:value=value
                    disabled=disabled
                    on:input=move |ev| on_value(event_target_value(&ev))
                />
            }
            .into_any()
        }
        FieldKind::Textarea => view! {
            <textarea
                class="form__input"
                rows="3"
                prop:value=value
                disabled=disabled
                on:input=move |ev| on_value(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                type="checkbox"
                prop:checked=move || value() == "true"
                disabled=disabled
                on:change=move |ev| on_value(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Select(kind) => view! {
            <select
                class="form__input"
                prop:value=value
                disabled=disabled
                on:change=move |ev| on_value(event_target_value(&ev))
            >
                <option value="">"— выберите —"</option>
                {move || {
                    editor
                        .with(|ed| ed.lookups.options(kind))
                        .into_iter()
                        .map(|(id, label)| {
                            let id = id.to_string();
                            let selected_id = id.clone();
                            view! { <option value=id selected=move || value() == selected_id>{label}</option> }
                        })
                        .collect_view()
                }}
            </select>
        }
        .into_any(),
        FieldKind::Choice(options) => view! {
            <select
                class="form__input"
                prop:value=value
                disabled=disabled
                on:change=move |ev| on_value(event_target_value(&ev))
            >
                <option value="">"— выберите —"</option>
                {options()
                    .into_iter()
                    .map(|(option, label)| {
                        view! { <option value=option selected=move || value() == option>{label}</option> }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <Label required=spec.required>{spec.label}</Label>
            {input}
            {move || error().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}
