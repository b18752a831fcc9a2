//! Mutation applier: one HTTP call per action, then a local patch of the
//! loaded list instead of a refetch.

use std::marker::PhantomData;

use crate::shared::http::ApiError;

use super::api::CollectionApi;
use super::entity::CollectionEntity;
use super::state::{DeleteConfirmation, ListState, StateCell};

/// Holds `is_submitting` for its lifetime and releases it on drop, whichever
/// way the mutation exits.
pub struct SubmittingGuard<E: CollectionEntity, S: StateCell<ListState<E>>> {
    state: S,
    _entity: PhantomData<E>,
}

impl<E: CollectionEntity, S: StateCell<ListState<E>>> SubmittingGuard<E, S> {
    pub fn acquire(state: &S) -> Result<Self, ApiError> {
        let acquired = state.update_state(|s| {
            if s.is_submitting {
                false
            } else {
                s.is_submitting = true;
                true
            }
        });
        match acquired {
            Some(true) => Ok(Self {
                state: state.clone(),
                _entity: PhantomData,
            }),
            Some(false) => Err(ApiError::Busy),
            None => Err(ApiError::Aborted),
        }
    }
}

impl<E: CollectionEntity, S: StateCell<ListState<E>>> Drop for SubmittingGuard<E, S> {
    fn drop(&mut self) {
        self.state.update_state(|s| s.is_submitting = false);
    }
}

pub async fn create<E, A, S>(api: &A, state: &S, payload: &E::Create) -> Result<E, ApiError>
where
    E: CollectionEntity,
    A: CollectionApi<E> + ?Sized,
    S: StateCell<ListState<E>>,
{
    let _guard = SubmittingGuard::acquire(state)?;
    let created = api.create(payload).await?;
    log::debug!("created {} {}", E::PATH, created.id());
    state.update_state(|s| s.apply_created(created.clone()));
    Ok(created)
}

pub async fn update<E, A, S>(api: &A, state: &S, id: i64, payload: &E::Update) -> Result<E, ApiError>
where
    E: CollectionEntity,
    A: CollectionApi<E> + ?Sized,
    S: StateCell<ListState<E>>,
{
    let _guard = SubmittingGuard::acquire(state)?;
    let updated = api.update(id, payload).await?;
    log::debug!("updated {} {}", E::PATH, id);
    state.update_state(|s| s.apply_updated(updated.clone()));
    Ok(updated)
}

pub async fn delete<E, A, S>(api: &A, state: &S, confirmation: DeleteConfirmation) -> Result<(), ApiError>
where
    E: CollectionEntity,
    A: CollectionApi<E> + ?Sized,
    S: StateCell<ListState<E>>,
{
    let _guard = SubmittingGuard::acquire(state)?;
    let id = confirmation.id();
    api.delete(id).await?;
    log::debug!("deleted {} {}", E::PATH, id);
    state.update_state(|s| s.apply_deleted(id));
    Ok(())
}

pub async fn restore<E, A, S>(api: &A, state: &S, id: i64) -> Result<E, ApiError>
where
    E: CollectionEntity,
    A: CollectionApi<E> + ?Sized,
    S: StateCell<ListState<E>>,
{
    let _guard = SubmittingGuard::acquire(state)?;
    let restored = api.restore(id).await?;
    log::debug!("restored {} {}", E::PATH, id);
    state.update_state(|s| s.apply_restored(restored.clone()));
    Ok(restored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::query::ListQuery;
    use crate::shared::collection::testing::{new_cell, payload, records, MockApi, TestCell};
    use futures::executor::block_on;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn loaded(n: i64) -> (MockApi, TestCell) {
        let api = MockApi::new(records(n));
        let state = new_cell(ListQuery::new(10));
        let page = block_on(api.list(&ListQuery::new(10))).unwrap();
        let (ticket, _) = state.borrow_mut().begin_load();
        state.borrow_mut().finish_load(ticket, Ok(page));
        (api, state)
    }

    #[test]
    fn test_create_prepends_new_record() {
        let (api, state) = loaded(3);
        let created = block_on(create(&api, &state, &payload("fresh"))).unwrap();
        let s = state.borrow();
        assert_eq!(s.records().len(), 4);
        assert_eq!(s.records()[0].id, created.id);
        assert_eq!(s.total(), 4);
    }

    #[test]
    fn test_update_changes_only_target() {
        let (api, state) = loaded(4);
        let before = state.borrow().records().to_vec();
        block_on(update(&api, &state, 2, &payload("changed"))).unwrap();
        let s = state.borrow();
        assert_eq!(s.records()[1].name, "changed");
        assert_eq!(s.records()[0], before[0]);
        assert_eq!(s.records()[2], before[2]);
        assert_eq!(s.records()[3], before[3]);
        assert_eq!(s.total(), 4);
    }

    #[test]
    fn test_delete_removes_record() {
        let (api, state) = loaded(4);
        state.borrow_mut().request_delete(3);
        let confirmation = state.borrow_mut().confirm_delete().unwrap();
        block_on(delete(&api, &state, confirmation)).unwrap();
        let s = state.borrow();
        assert!(s.records().iter().all(|r| r.id != 3));
        assert_eq!(s.total(), 3);
    }

    #[test]
    fn test_failed_delete_leaves_list_untouched() {
        let (api, state) = loaded(4);
        api.fail_next_mutation(ApiError::Server { status: 409, message: Some("Record is referenced".into()) });
        state.borrow_mut().request_delete(3);
        let confirmation = state.borrow_mut().confirm_delete().unwrap();
        let err = block_on(delete(&api, &state, confirmation)).unwrap_err();
        assert_eq!(err.user_message(), "Record is referenced");
        assert_eq!(state.borrow().records().len(), 4);
        assert_eq!(state.borrow().total(), 4);
    }

    #[test]
    fn test_submitting_flag_held_during_call_and_released() {
        let (api, state) = loaded(2);
        let probe = state.clone();
        api.set_probe(move || probe.borrow().is_submitting);

        block_on(create(&api, &state, &payload("a"))).unwrap();
        assert_eq!(api.probed(), vec![true]);
        assert!(!state.borrow().is_submitting);

        api.fail_next_mutation(ApiError::Timeout);
        assert!(block_on(update(&api, &state, 1, &payload("b"))).is_err());
        assert_eq!(api.probed(), vec![true, true]);
        assert!(!state.borrow().is_submitting);
    }

    #[test]
    fn test_submitting_flag_released_on_panic() {
        let (api, state) = loaded(2);
        api.panic_next_mutation();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _ = block_on(create(&api, &state, &payload("boom")));
        }));
        assert!(result.is_err());
        assert!(!state.borrow().is_submitting);
    }

    #[test]
    fn test_concurrent_mutation_is_refused() {
        let (api, state) = loaded(2);
        state.borrow_mut().is_submitting = true;
        let err = block_on(create(&api, &state, &payload("x"))).unwrap_err();
        assert_eq!(err, ApiError::Busy);
        assert!(state.borrow().is_submitting);
        assert_eq!(api.mutation_calls(), 0);
    }

    #[test]
    fn test_restore_prepends_when_hidden() {
        let (api, state) = loaded(2);
        api.add_deleted(9);
        let restored = block_on(restore(&api, &state, 9)).unwrap();
        assert!(restored.deleted_at.is_none());
        assert_eq!(state.borrow().records()[0].id, 9);
        assert_eq!(state.borrow().total(), 3);
    }
}
