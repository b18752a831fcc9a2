use crate::shared::notifications::Notifier;

use super::api::CollectionApi;
use super::entity::CollectionEntity;
use super::state::{ListState, LoadOutcome, StateCell};

/// Fetches the page described by the current query state.
///
/// Responses to superseded requests are discarded. Failures reach the
/// notifier unless the request was aborted. When the server reports that the
/// requested page no longer exists, the page is clamped and fetched once more.
pub async fn load<E, A, S>(api: &A, state: &S, notifier: &dyn Notifier) -> LoadOutcome
where
    E: CollectionEntity,
    A: CollectionApi<E> + ?Sized,
    S: StateCell<ListState<E>>,
{
    let mut outcome = load_once(api, state, notifier).await;
    if outcome == LoadOutcome::PageClamped {
        outcome = load_once(api, state, notifier).await;
    }
    outcome
}

async fn load_once<E, A, S>(api: &A, state: &S, notifier: &dyn Notifier) -> LoadOutcome
where
    E: CollectionEntity,
    A: CollectionApi<E> + ?Sized,
    S: StateCell<ListState<E>>,
{
    let Some((ticket, query)) = state.update_state(|s| s.begin_load()) else {
        return LoadOutcome::Disposed;
    };
    log::debug!("load {} {:?} page={}", E::PATH, ticket, query.page);

    let result = api.list(&query).await;
    let outcome = state
        .update_state(|s| s.finish_load(ticket, result))
        .unwrap_or(LoadOutcome::Disposed);

    match &outcome {
        LoadOutcome::Failed(message) => {
            log::warn!("load {} failed: {}", E::PATH, message);
            notifier.error(message);
        }
        LoadOutcome::Stale => log::debug!("load {} {:?} superseded, dropped", E::PATH, ticket),
        LoadOutcome::PageClamped => log::debug!("load {} page clamped, refetching", E::PATH),
        _ => {}
    }
    outcome
}
