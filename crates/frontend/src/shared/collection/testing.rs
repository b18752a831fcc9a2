//! In-memory doubles for controller tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use contracts::shared::envelope::{ListEnvelope, Page, Pagination};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::http::ApiError;
use crate::shared::list_utils::{Searchable, SortValue, Sortable};
use crate::shared::notifications::{Notifier, ToastKind};

use super::api::CollectionApi;
use super::entity::CollectionEntity;
use super::form_bridge::{FieldKind, FieldReader, FieldSpec, FormDraft, FormModel, Reactions, ValidationErrors};
use super::lookups::LookupSource;
use super::query::{total_pages, ListQuery};
use super::state::{ErrorPolicy, ListState};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestPayload {
    pub name: String,
    pub weight: Option<f64>,
}

impl Searchable for TestRecord {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

impl Sortable for TestRecord {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "id" => SortValue::Number(self.id as f64),
            "name" => SortValue::text(&self.name),
            "weight" => SortValue::opt_number(self.weight),
            _ => SortValue::Empty,
        }
    }
}

impl CollectionEntity for TestRecord {
    const PATH: &'static str = "/tests";
    const SOFT_DELETE: bool = true;

    type Create = TestPayload;
    type Update = TestPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }
}

fn read_payload(draft: &FormDraft) -> Result<TestPayload, ValidationErrors> {
    let mut r = FieldReader::new(draft);
    let name = r.required_text("name");
    let weight = r.optional_number("weight");
    r.finish()?;
    Ok(TestPayload { name, weight })
}

impl FormModel for TestRecord {
    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("name", "Name", FieldKind::Text).required(),
            FieldSpec::new("weight", "Weight", FieldKind::Number),
        ]
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::from_pairs([
            ("name", self.name.clone()),
            ("weight", self.weight.map(|w| w.to_string()).unwrap_or_default()),
        ])
    }

    fn to_create(draft: &FormDraft) -> Result<TestPayload, ValidationErrors> {
        read_payload(draft)
    }

    fn to_update(draft: &FormDraft) -> Result<TestPayload, ValidationErrors> {
        read_payload(draft)
    }

    fn locked_on_edit(&self) -> Vec<&'static str> {
        if self.id == 1 {
            vec!["name"]
        } else {
            Vec::new()
        }
    }

    fn reactions<L: LookupSource + Clone + 'static>(source: &L) -> Reactions {
        let source = source.clone();
        Reactions::default().on("name", move |name| {
            let source = source.clone();
            Box::pin(async move { source.fetch_one::<Value>(&format!("/hints/{}", name)).await })
        })
    }
}

pub type TestCell = Rc<RefCell<ListState<TestRecord>>>;

pub fn rec(id: i64, name: &str) -> TestRecord {
    TestRecord {
        id,
        name: name.to_string(),
        weight: None,
        deleted_at: None,
    }
}

/// Records 1..=n named "record N"
pub fn records(n: i64) -> Vec<TestRecord> {
    (1..=n).map(|i| rec(i, &format!("record {}", i))).collect()
}

pub fn payload(name: &str) -> TestPayload {
    TestPayload {
        name: name.to_string(),
        weight: None,
    }
}

pub fn page_of(records: Vec<TestRecord>, pagination: Option<Pagination>) -> Page<TestRecord> {
    Page { records, pagination }
}

pub fn new_cell(query: ListQuery) -> TestCell {
    Rc::new(RefCell::new(ListState::new(query, ErrorPolicy::RetainStale)))
}

// ============================================================================
// MockApi
// ============================================================================

#[derive(Default)]
struct MockInner {
    records: RefCell<Vec<TestRecord>>,
    paginated: Cell<bool>,
    list_calls: Cell<usize>,
    mutation_calls: Cell<usize>,
    fail_list: RefCell<Option<ApiError>>,
    fail_mutation: RefCell<Option<ApiError>>,
    panic_mutation: Cell<bool>,
    probe: RefCell<Option<Box<dyn Fn() -> bool>>>,
    probed: RefCell<Vec<bool>>,
    lookups: RefCell<HashMap<String, Result<Value, ApiError>>>,
    lookup_calls: RefCell<Vec<String>>,
}

/// Server double: bare array by default, paged wrapper with server-side search
/// after [`MockApi::paginated`].
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Rc<MockInner>,
}

impl MockApi {
    pub fn new(records: Vec<TestRecord>) -> Self {
        let api = Self::default();
        *api.inner.records.borrow_mut() = records;
        api
    }

    pub fn paginated(self) -> Self {
        self.inner.paginated.set(true);
        self
    }

    pub fn fail_next_list(&self, error: ApiError) {
        *self.inner.fail_list.borrow_mut() = Some(error);
    }

    pub fn fail_next_mutation(&self, error: ApiError) {
        *self.inner.fail_mutation.borrow_mut() = Some(error);
    }

    pub fn panic_next_mutation(&self) {
        self.inner.panic_mutation.set(true);
    }

    /// Called at the start of every mutation; results are kept in [`MockApi::probed`]
    pub fn set_probe(&self, probe: impl Fn() -> bool + 'static) {
        *self.inner.probe.borrow_mut() = Some(Box::new(probe));
    }

    pub fn probed(&self) -> Vec<bool> {
        self.inner.probed.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.inner.list_calls.get()
    }

    pub fn mutation_calls(&self) -> usize {
        self.inner.mutation_calls.get()
    }

    pub fn add_deleted(&self, id: i64) {
        let mut record = rec(id, &format!("record {}", id));
        record.deleted_at = Some("2024-01-01T00:00:00Z".into());
        self.inner.records.borrow_mut().push(record);
    }

    pub fn set_lookup(&self, path: &str, response: Result<Value, ApiError>) {
        self.inner
            .lookups
            .borrow_mut()
            .insert(path.to_string(), response);
    }

    pub fn lookup_calls(&self) -> Vec<String> {
        self.inner.lookup_calls.borrow().clone()
    }

    fn begin_mutation(&self) -> Result<(), ApiError> {
        self.inner.mutation_calls.set(self.inner.mutation_calls.get() + 1);
        if let Some(probe) = self.inner.probe.borrow().as_ref() {
            let seen = probe();
            self.inner.probed.borrow_mut().push(seen);
        }
        if self.inner.panic_mutation.replace(false) {
            panic!("mock mutation panicked");
        }
        match self.inner.fail_mutation.borrow_mut().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn lookup(&self, path: &str) -> Result<Value, ApiError> {
        self.inner.lookup_calls.borrow_mut().push(path.to_string());
        self.inner
            .lookups
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_else(|| Ok(Value::Array(Vec::new())))
    }
}

fn not_found() -> ApiError {
    ApiError::Server {
        status: 404,
        message: None,
    }
}

#[async_trait(?Send)]
impl CollectionApi<TestRecord> for MockApi {
    async fn list(&self, query: &ListQuery) -> Result<Page<TestRecord>, ApiError> {
        self.inner.list_calls.set(self.inner.list_calls.get() + 1);
        if let Some(error) = self.inner.fail_list.borrow_mut().take() {
            return Err(error);
        }
        let all = self.inner.records.borrow().clone();
        if !self.inner.paginated.get() {
            return Ok(page_of(all, None));
        }

        let matching: Vec<TestRecord> = all
            .into_iter()
            .filter(|r| r.matches_filter(&query.search))
            .collect();
        let total = matching.len();
        let start = (query.page - 1) * query.page_size;
        let rows = matching
            .into_iter()
            .skip(start)
            .take(query.page_size)
            .collect();
        Ok(page_of(
            rows,
            Some(Pagination {
                total,
                page: query.page,
                page_size: query.page_size,
                total_pages: total_pages(total, query.page_size),
            }),
        ))
    }

    async fn create(&self, payload: &TestPayload) -> Result<TestRecord, ApiError> {
        self.begin_mutation()?;
        let mut records = self.inner.records.borrow_mut();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = TestRecord {
            id,
            name: payload.name.clone(),
            weight: payload.weight,
            deleted_at: None,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, payload: &TestPayload) -> Result<TestRecord, ApiError> {
        self.begin_mutation()?;
        let mut records = self.inner.records.borrow_mut();
        let record = records.iter_mut().find(|r| r.id == id).ok_or_else(not_found)?;
        record.name = payload.name.clone();
        record.weight = payload.weight;
        Ok(record.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.begin_mutation()?;
        let mut records = self.inner.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn restore(&self, id: i64) -> Result<TestRecord, ApiError> {
        self.begin_mutation()?;
        let mut records = self.inner.records.borrow_mut();
        let record = records.iter_mut().find(|r| r.id == id).ok_or_else(not_found)?;
        record.deleted_at = None;
        Ok(record.clone())
    }
}

#[async_trait(?Send)]
impl LookupSource for MockApi {
    async fn fetch_all<T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        let value = self.lookup(path)?;
        let envelope: ListEnvelope<T> =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.into_page().records)
    }

    async fn fetch_one<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + 'static,
    {
        let value = self.lookup(path)?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// ============================================================================
// Notifier
// ============================================================================

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, _kind: ToastKind, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
