use std::cell::RefCell;
use std::rc::Rc;

use contracts::shared::envelope::Page;
use leptos::prelude::*;

use crate::shared::http::ApiError;
use crate::shared::list_utils::sort_list;

use super::entity::CollectionEntity;
use super::query::{total_pages, FilterValue, ListQuery};
use super::transform::{paginate, transform};

/// Shared mutable slot holding a piece of controller state.
///
/// Implemented for Leptos signals and for `Rc<RefCell<_>>`. Both methods
/// return `None` once the owning view has been disposed, so late responses
/// are dropped instead of touching a dead page.
pub trait StateCell<S>: Clone + 'static {
    fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R>;
}

impl<S: 'static> StateCell<S> for Rc<RefCell<S>> {
    fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
    fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// How the loaded records relate to the server's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingMode {
    /// Response had a pagination wrapper: records are one server page.
    Server,
    /// Response was the whole collection: paging and search happen locally.
    Client,
}

/// What happens to loaded rows when a refetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Keep the stale rows and show a non-blocking banner
    #[default]
    RetainStale,
    /// Clear the rows and zero the total
    ClearList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    /// Requested page no longer exists; the page was clamped and must be refetched
    PageClamped,
    /// A newer request was dispatched; this response was discarded
    Stale,
    Failed(String),
    Aborted,
    /// The owning view is gone
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    Rejected,
    Local,
    Refetch,
}

/// Proof that the user confirmed deletion of a record.
///
/// Only [`ListState::confirm_delete`] hands these out.
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteConfirmation {
    id: i64,
}

impl DeleteConfirmation {
    pub fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct ListState<E> {
    pub query: ListQuery,
    records: Vec<E>,
    total: usize,
    mode: PagingMode,
    policy: ErrorPolicy,
    pub loading: bool,
    pub error: Option<String>,
    pub is_submitting: bool,
    pending_delete: Option<i64>,
    latest_ticket: u64,
}

impl<E: CollectionEntity> ListState<E> {
    pub fn new(query: ListQuery, policy: ErrorPolicy) -> Self {
        Self {
            query,
            records: Vec::new(),
            total: 0,
            mode: PagingMode::Server,
            policy,
            loading: false,
            error: None,
            is_submitting: false,
            pending_delete: None,
            latest_ticket: 0,
        }
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    /// Server-reported total, adjusted by local mutations
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn mode(&self) -> PagingMode {
        self.mode
    }

    // ------------------------------------------------------------------
    // Fetch coordination
    // ------------------------------------------------------------------

    /// Marks a load as started and returns its ticket plus the query to send.
    pub fn begin_load(&mut self) -> (RequestTicket, ListQuery) {
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        (RequestTicket(self.latest_ticket), self.query.clone())
    }

    pub fn finish_load(
        &mut self,
        ticket: RequestTicket,
        result: Result<Page<E>, ApiError>,
    ) -> LoadOutcome {
        if ticket.0 != self.latest_ticket {
            return LoadOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(page) => {
                self.mode = if page.pagination.is_some() {
                    PagingMode::Server
                } else {
                    PagingMode::Client
                };
                self.total = page.total();
                self.records = page.records;
                if let Some(sort) = &self.query.sort {
                    sort_list(&mut self.records, &sort.key, sort.direction.is_ascending());
                }

                let clamped = self.query.clamp_page(self.total_pages());
                if clamped && self.mode == PagingMode::Server {
                    LoadOutcome::PageClamped
                } else {
                    LoadOutcome::Applied
                }
            }
            Err(ApiError::Aborted) => LoadOutcome::Aborted,
            Err(e) => {
                let message = e.user_message();
                if self.policy == ErrorPolicy::ClearList {
                    self.records.clear();
                    self.total = 0;
                    self.query.page = 1;
                }
                self.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// A server page emptied by local deletes while more records exist.
    pub fn needs_refetch(&self) -> bool {
        self.mode == PagingMode::Server
            && !self.loading
            && self.total > 0
            && self.filtered().is_empty()
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Loaded rows after soft-delete exclusion and, in client mode, search.
    pub fn filtered(&self) -> Vec<E> {
        let rows: Vec<E> = self
            .records
            .iter()
            .filter(|r| self.query.include_deleted || !r.is_deleted())
            .cloned()
            .collect();
        match self.mode {
            PagingMode::Client => transform(rows, &self.query.search, None),
            PagingMode::Server => rows,
        }
    }

    /// Rows of the current page window.
    pub fn visible(&self) -> Vec<E> {
        let rows = self.filtered();
        match self.mode {
            PagingMode::Client => {
                paginate(&rows, self.query.page, self.query.page_size).to_vec()
            }
            PagingMode::Server => rows,
        }
    }

    /// Count the pager works from.
    pub fn display_total(&self) -> usize {
        match self.mode {
            PagingMode::Client => self.filtered().len(),
            PagingMode::Server => self.total,
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.display_total(), self.query.page_size)
    }

    // ------------------------------------------------------------------
    // Query changes; each returns whether the server must be asked again
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, term: &str) -> bool {
        self.query.set_search(term) && self.mode == PagingMode::Server
    }

    pub fn set_filter(&mut self, name: &str, value: Option<FilterValue>) -> bool {
        if self.query.filter(name) == value.as_ref() {
            return false;
        }
        self.query.set_filter(name, value);
        true
    }

    pub fn clear_filters(&mut self) -> bool {
        if self.query.filters.is_empty() {
            return false;
        }
        self.query.clear_filters();
        true
    }

    /// Sorts the loaded rows right away; server mode also refetches in the new order.
    pub fn set_sort(&mut self, key: &str) -> bool {
        self.query.set_sort(key);
        if let Some(sort) = &self.query.sort {
            sort_list(&mut self.records, &sort.key, sort.direction.is_ascending());
        }
        self.mode == PagingMode::Server
    }

    pub fn set_page(&mut self, page: usize) -> PageChange {
        let total_pages = self.total_pages();
        if !self.query.set_page(page, total_pages) {
            return PageChange::Rejected;
        }
        match self.mode {
            PagingMode::Server => PageChange::Refetch,
            PagingMode::Client => PageChange::Local,
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        self.query.set_page_size(page_size);
        self.mode == PagingMode::Server
    }

    pub fn set_include_deleted(&mut self, include: bool) -> bool {
        if self.query.include_deleted == include {
            return false;
        }
        self.query.set_include_deleted(include);
        true
    }

    // ------------------------------------------------------------------
    // Local patches after successful mutations
    // ------------------------------------------------------------------

    pub fn apply_created(&mut self, record: E) {
        self.records.insert(0, record);
        self.total += 1;
        self.clamp_page();
    }

    /// Replaces the record in place; returns `false` if it is not loaded.
    pub fn apply_updated(&mut self, record: E) -> bool {
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn apply_deleted(&mut self, id: i64) -> bool {
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
        }
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            return false;
        };
        self.records.remove(index);
        self.total = self.total.saturating_sub(1);
        self.clamp_page();
        true
    }

    pub fn apply_restored(&mut self, record: E) {
        if !self.apply_updated(record.clone()) {
            self.apply_created(record);
        }
    }

    fn clamp_page(&mut self) {
        let pages = self.total_pages();
        self.query.clamp_page(pages);
    }

    // ------------------------------------------------------------------
    // Delete confirmation
    // ------------------------------------------------------------------

    /// Asks for confirmation; ignored for records that are not loaded.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.records.iter().any(|r| r.id() == id) {
            self.pending_delete = Some(id);
            true
        } else {
            false
        }
    }

    pub fn pending_delete(&self) -> Option<&E> {
        let id = self.pending_delete?;
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<DeleteConfirmation> {
        self.pending_delete.take().map(|id| DeleteConfirmation { id })
    }
}
