use crate::shared::icons::icon;
use leptos::ev;
use std::sync::Arc;
use leptos::prelude::*;
use thaw::*;

/// Модальное окно. Escape и клик по подложке закрывают его через `on_close`;
/// вызывающий решает, можно ли закрыться (например, не во время отправки).
#[component]
pub fn Modal(
    #[prop(into)]
    title: Signal<String>,
    on_close: Callback<()>,
    /// Кнопки в подвале (Сохранить, Отмена)
    #[prop(optional)]
    footer: Option<ChildrenFn>,
    children: Children,
) -> impl IntoView {
    let keydown = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                        {icon("x")}
                    </button>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
                {footer.map(|footer| view! { <div class="modal-footer">{footer()}</div> })}
            </div>
        </div>
    }
}

/// Явное подтверждение необратимого действия
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: Signal<String>,
    #[prop(optional, into)]
    confirm_label: Option<String>,
    #[prop(optional, into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_label = confirm_label.unwrap_or_else(|| "Удалить".to_string());
    let close = Callback::new(move |_| {
        if !busy.get_untracked() {
            on_cancel.run(());
        }
    });

    view! {
        <Modal
            title=title
            on_close=close
            footer=Arc::new(move || {
                let confirm_label = confirm_label.clone();
                view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| close.run(())
                        disabled=busy
                    >
                        "Отмена"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_confirm.run(())
                        disabled=busy
                    >
                        {move || if busy.get() { "Удаление...".to_string() } else { confirm_label.clone() }}
                    </Button>
                }
                .into_any()
            })
        >
            <p class="confirm-dialog__message">{move || message.get()}</p>
        </Modal>
    }
}
