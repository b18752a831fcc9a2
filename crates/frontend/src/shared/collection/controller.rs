//! One controller per entity page: query changes, loads, the modal form and
//! mutations, wired to a state cell the view observes.

use std::marker::PhantomData;
use std::rc::Rc;

use crate::shared::http::ApiError;
use crate::shared::notifications::Notifier;
use crate::shared::state::form_state::{FormMode, ModalForm};

use super::api::CollectionApi;
use super::fetch;
use super::form_bridge::{FieldSpec, FormBridge, FormError, FormModel, Reactions, ValidationErrors};
use super::lookups::{load_lookups, LookupSource, Lookups};
use super::mutation;
use super::query::FilterValue;
use super::state::{ListState, LoadOutcome, PageChange, StateCell};

/// Состояние модальной формы вместе со справочниками
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState<E> {
    pub form: ModalForm,
    pub bridge: FormBridge,
    /// Запись, открытая на редактирование
    pub editing: Option<E>,
    pub lookups: Lookups,
    pub lookups_loading: bool,
    pub lookups_error: Option<String>,
}

impl<E> Default for EditorState<E> {
    fn default() -> Self {
        Self {
            form: ModalForm::default(),
            bridge: FormBridge::default(),
            editing: None,
            lookups: Lookups::default(),
            lookups_loading: false,
            lookups_error: None,
        }
    }
}

impl<E: FormModel> EditorState<E> {
    /// Поля формы для текущего режима
    pub fn visible_fields(&self) -> Vec<FieldSpec> {
        let editing = self.form.is_edit();
        E::fields()
            .into_iter()
            .filter(|f| f.visible_in(editing))
            .collect()
    }

    pub fn is_locked(&self, field: &str) -> bool {
        self.editing
            .as_ref()
            .map(|record| record.locked_on_edit().contains(&field))
            .unwrap_or(false)
    }
}

pub struct CollectionController<E, A, S, T> {
    api: A,
    state: S,
    editor: T,
    notifier: Rc<dyn Notifier>,
    reactions: Reactions,
    _entity: PhantomData<fn() -> E>,
}

impl<E, A: Clone, S: Clone, T: Clone> Clone for CollectionController<E, A, S, T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            editor: self.editor.clone(),
            notifier: self.notifier.clone(),
            reactions: self.reactions.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E, A, S, T> CollectionController<E, A, S, T>
where
    E: FormModel,
    A: CollectionApi<E> + LookupSource + Clone + 'static,
    S: StateCell<ListState<E>>,
    T: StateCell<EditorState<E>>,
{
    pub fn new(api: A, state: S, editor: T, notifier: Rc<dyn Notifier>) -> Self {
        let reactions = E::reactions(&api);
        Self {
            api,
            state,
            editor,
            notifier,
            reactions,
            _entity: PhantomData,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn editor(&self) -> &T {
        &self.editor
    }

    // ------------------------------------------------------------------
    // Query
    // ------------------------------------------------------------------

    pub async fn load(&self) -> LoadOutcome {
        fetch::load(&self.api, &self.state, self.notifier.as_ref()).await
    }

    /// Applies a query change and refetches when it cannot be served locally.
    async fn change_query(&self, change: impl FnOnce(&mut ListState<E>) -> bool) {
        if self.state.update_state(change).unwrap_or(false) {
            self.load().await;
        }
    }

    pub async fn set_search(&self, term: String) {
        self.change_query(|s| s.set_search(&term)).await
    }

    pub async fn set_filter(&self, name: &str, value: Option<FilterValue>) {
        self.change_query(|s| s.set_filter(name, value)).await
    }

    pub async fn clear_filters(&self) {
        self.change_query(|s| s.clear_filters()).await
    }

    pub async fn set_sort(&self, key: &str) {
        self.change_query(|s| s.set_sort(key)).await
    }

    pub async fn set_page_size(&self, page_size: usize) {
        self.change_query(|s| s.set_page_size(page_size)).await
    }

    pub async fn set_include_deleted(&self, include: bool) {
        self.change_query(|s| s.set_include_deleted(include)).await
    }

    pub async fn set_page(&self, page: usize) {
        let change = self.state.update_state(|s| s.set_page(page));
        if change == Some(PageChange::Refetch) {
            self.load().await;
        }
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    pub async fn open_create(&self) {
        let opened = self.editor.update_state(|ed| {
            let opened = ed.form.open_create();
            if opened {
                ed.bridge = FormBridge::new(E::empty_draft());
                ed.editing = None;
            }
            opened
        });
        if opened == Some(true) {
            self.load_form_lookups().await;
        }
    }

    pub async fn open_edit(&self, id: i64) {
        let record = self
            .state
            .with_state(|s| s.records().iter().find(|r| r.id() == id).cloned())
            .flatten();
        let Some(record) = record else {
            self.notifier.error(&ApiError::Server { status: 404, message: None }.user_message());
            return;
        };
        let opened = self.editor.update_state(|ed| {
            let opened = ed.form.open_edit(id);
            if opened {
                ed.bridge = FormBridge::new(record.to_draft());
                ed.editing = Some(record);
            }
            opened
        });
        if opened == Some(true) {
            self.load_form_lookups().await;
        }
    }

    pub fn close_form(&self) -> bool {
        self.editor.update_state(|ed| ed.form.close()).unwrap_or(false)
    }

    /// Fans out every lookup the form needs; on failure the form stays open
    /// with empty options.
    async fn load_form_lookups(&self) {
        let kinds = E::lookups();
        if kinds.is_empty() {
            return;
        }
        self.editor.update_state(|ed| {
            ed.lookups_loading = true;
            ed.lookups_error = None;
        });
        let result = load_lookups(&self.api, &kinds).await;
        let error = self
            .editor
            .update_state(|ed| {
                ed.lookups_loading = false;
                match result {
                    Ok(lookups) => {
                        ed.lookups = lookups;
                        None
                    }
                    Err(e) => {
                        ed.lookups = Lookups::default();
                        let message = e.user_message();
                        ed.lookups_error = Some(message.clone());
                        Some(message)
                    }
                }
            })
            .flatten();
        if let Some(message) = error {
            self.notifier.error(&message);
        }
    }

    pub async fn on_field_change(&self, name: String, value: String) {
        let Some(change) = self.editor.update_state(|ed| ed.bridge.set_field(&name, value.clone())) else {
            return;
        };
        let Some(reaction) = self.reactions.dispatch(&name, &value) else {
            return;
        };
        match reaction.await {
            Ok(result) => {
                self.editor
                    .update_state(|ed| ed.bridge.store_reaction::<E>(&change, result));
            }
            Err(e) if e.is_aborted() => {}
            Err(e) => {
                log::warn!("reaction on '{}' failed: {}", name, e);
                let current = self
                    .editor
                    .with_state(|ed| ed.bridge.is_current(&change))
                    .unwrap_or(false);
                if current {
                    self.notifier.error(&e.user_message());
                }
            }
        }
    }

    /// Validates the draft, then creates or updates. Validation errors stay
    /// inline and never reach the network.
    pub async fn submit(&self) -> Result<(), FormError> {
        let Some(Some(mode)) = self.editor.with_state(|ed| ed.form.mode()) else {
            return Ok(());
        };
        let result = match mode {
            FormMode::Create => {
                let payload = self.build(|ed| ed.bridge.to_create::<E>())?;
                if !self.begin_submit() {
                    return Ok(());
                }
                mutation::create(&self.api, &self.state, &payload).await.map(|_| "Запись создана")
            }
            FormMode::Edit(id) => {
                let payload = self.build(|ed| ed.bridge.to_update::<E>())?;
                if !self.begin_submit() {
                    return Ok(());
                }
                mutation::update(&self.api, &self.state, id, &payload).await.map(|_| "Изменения сохранены")
            }
        };

        match result {
            Ok(message) => {
                self.editor.update_state(|ed| {
                    ed.form.submit_succeeded();
                    ed.editing = None;
                });
                self.notifier.success(message);
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                log::warn!("submit {} failed: {}", E::PATH, e);
                self.editor.update_state(|ed| ed.form.submit_failed(message.clone()));
                if !e.is_aborted() {
                    self.notifier.error(&message);
                }
                Err(FormError::Api(e))
            }
        }
    }

    fn build<P>(
        &self,
        read: impl FnOnce(&mut EditorState<E>) -> Result<P, ValidationErrors>,
    ) -> Result<P, FormError> {
        match self.editor.update_state(read) {
            Some(result) => result.map_err(FormError::from),
            None => Err(FormError::Api(ApiError::Aborted)),
        }
    }

    fn begin_submit(&self) -> bool {
        self.editor
            .update_state(|ed| ed.form.begin_submit().is_some())
            .unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Delete / restore
    // ------------------------------------------------------------------

    pub fn request_delete(&self, id: i64) -> bool {
        self.state.update_state(|s| s.request_delete(id)).unwrap_or(false)
    }

    pub fn cancel_delete(&self) {
        self.state.update_state(|s| s.cancel_delete());
    }

    pub async fn confirm_delete(&self) -> Result<(), ApiError> {
        let Some(confirmation) = self.state.update_state(|s| s.confirm_delete()).flatten() else {
            return Ok(());
        };
        match mutation::delete(&self.api, &self.state, confirmation).await {
            Ok(()) => {
                self.notifier.success("Запись удалена");
                if self.state.with_state(|s| s.needs_refetch()).unwrap_or(false) {
                    self.load().await;
                }
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    pub async fn restore(&self, id: i64) -> Result<(), ApiError> {
        match mutation::restore(&self.api, &self.state, id).await {
            Ok(_) => {
                self.notifier.success("Запись восстановлена");
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    fn report(&self, error: &ApiError) {
        log::warn!("{} mutation failed: {}", E::PATH, error);
        if !error.is_aborted() {
            self.notifier.error(&error.user_message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::query::ListQuery;
    use crate::shared::collection::testing::{new_cell, records, MockApi, RecordingNotifier, TestCell, TestRecord};
    use crate::shared::state::form_state::FormPhase;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::RefCell;

    type Editor = Rc<RefCell<EditorState<TestRecord>>>;
    type Controller = CollectionController<TestRecord, MockApi, TestCell, Editor>;

    fn setup(api: MockApi) -> (Controller, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let controller = CollectionController::new(
            api,
            new_cell(ListQuery::new(10)),
            Rc::new(RefCell::new(EditorState::default())),
            Rc::new(notifier.clone()),
        );
        block_on(controller.load());
        (controller, notifier)
    }

    #[test]
    fn test_invalid_weight_never_reaches_network() {
        let api = MockApi::new(records(3));
        let (ctrl, _) = setup(api.clone());
        block_on(ctrl.open_create());
        block_on(ctrl.on_field_change("name".into(), "new".into()));
        block_on(ctrl.on_field_change("weight".into(), "abc".into()));

        let err = block_on(ctrl.submit()).unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(api.mutation_calls(), 0);
        let editor = ctrl.editor().borrow();
        assert_eq!(editor.form.phase(), FormPhase::Open(FormMode::Create));
        assert!(editor.bridge.field_error("weight").is_some());
    }

    #[test]
    fn test_create_closes_form_and_prepends() {
        let api = MockApi::new(records(3));
        let (ctrl, notifier) = setup(api.clone());
        block_on(ctrl.open_create());
        block_on(ctrl.on_field_change("name".into(), "fresh".into()));
        block_on(ctrl.submit()).unwrap();

        assert_eq!(ctrl.editor().borrow().form.phase(), FormPhase::Closed);
        let state = ctrl.state().borrow();
        assert_eq!(state.records()[0].name, "fresh");
        assert_eq!(state.total(), 4);
        assert_eq!(notifier.messages(), vec!["Запись создана".to_string()]);
    }

    #[test]
    fn test_failed_update_keeps_form_open_with_server_message() {
        let api = MockApi::new(records(3));
        let (ctrl, _) = setup(api.clone());
        block_on(ctrl.open_edit(2));
        assert_eq!(ctrl.editor().borrow().bridge.draft().get("name"), "record 2");

        block_on(ctrl.on_field_change("name".into(), "renamed".into()));
        api.fail_next_mutation(ApiError::Server { status: 422, message: Some("Name taken".into()) });
        assert!(block_on(ctrl.submit()).is_err());

        let editor = ctrl.editor().borrow();
        assert_eq!(editor.form.phase(), FormPhase::Open(FormMode::Edit(2)));
        assert_eq!(editor.form.error(), Some("Name taken"));
        assert_eq!(ctrl.state().borrow().records()[1].name, "record 2");
        assert!(!ctrl.state().borrow().is_submitting);
    }

    #[test]
    fn test_locked_fields_follow_record() {
        let (ctrl, _) = setup(MockApi::new(records(3)));
        block_on(ctrl.open_edit(1));
        assert!(ctrl.editor().borrow().is_locked("name"));
        ctrl.close_form();
        block_on(ctrl.open_edit(2));
        assert!(!ctrl.editor().borrow().is_locked("name"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let api = MockApi::new(records(3));
        let (ctrl, _) = setup(api.clone());
        block_on(ctrl.confirm_delete()).unwrap();
        assert_eq!(api.mutation_calls(), 0);

        assert!(ctrl.request_delete(2));
        block_on(ctrl.confirm_delete()).unwrap();
        assert_eq!(api.mutation_calls(), 1);
        assert_eq!(ctrl.state().borrow().total(), 2);
    }

    #[test]
    fn test_emptied_server_page_is_refetched() {
        let api = MockApi::new(records(12)).paginated();
        let (ctrl, _) = setup(api.clone());
        block_on(ctrl.set_page(2));
        assert_eq!(api.list_calls(), 2);

        for id in [11, 12] {
            assert!(ctrl.request_delete(id));
            block_on(ctrl.confirm_delete()).unwrap();
        }
        assert_eq!(api.list_calls(), 3);
        let state = ctrl.state().borrow();
        assert_eq!(state.query.page, 1);
        assert_eq!(state.records().len(), 10);
        assert_eq!(state.total(), 10);
    }

    #[test]
    fn test_reaction_result_is_stored_separately() {
        let api = MockApi::new(records(1));
        api.set_lookup("/hints/cocoa", Ok(json!({ "price": 4.5 })));
        let (ctrl, _) = setup(api.clone());
        block_on(ctrl.open_create());
        block_on(ctrl.on_field_change("name".into(), "cocoa".into()));

        let editor = ctrl.editor().borrow();
        assert_eq!(editor.bridge.derived("name"), Some(&json!({ "price": 4.5 })));
        assert_eq!(editor.bridge.draft().get("name"), "cocoa");
        assert_eq!(api.lookup_calls(), vec!["/hints/cocoa"]);
    }

    #[test]
    fn test_server_search_refetches() {
        let api = MockApi::new(records(12)).paginated();
        let (ctrl, _) = setup(api.clone());
        assert_eq!(api.list_calls(), 1);
        block_on(ctrl.set_search("record 1".into()));
        assert_eq!(api.list_calls(), 2);
        assert_eq!(ctrl.state().borrow().total(), 4);
        block_on(ctrl.set_page(1));
        assert_eq!(api.list_calls(), 2);
    }
}
