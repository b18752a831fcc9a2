//! Transient toast notifications.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const TOAST_TTL_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Error => "toast toast--error",
            ToastKind::Success => "toast toast--success",
            ToastKind::Info => "toast toast--info",
        }
    }
}

/// Sink for user-facing transient messages.
pub trait Notifier {
    fn notify(&self, kind: ToastKind, message: &str);

    fn error(&self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    fn success(&self, message: &str) {
        self.notify(ToastKind::Success, message);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastService {
    fn notify(&self, kind: ToastKind, message: &str) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.to_string(),
            })
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_TTL_MS).await;
            toasts.try_update(|list| list.retain(|t| t.id != id));
        });
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().unwrap_or_default()
}

#[component]
pub fn ToastArea() -> impl IntoView {
    let service = use_toasts();

    view! {
        <div class="toast-area">
            <For
                each=move || service.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| service.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
