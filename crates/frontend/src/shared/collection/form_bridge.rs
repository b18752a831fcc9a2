//! Form bridge: string draft of a modal form → typed, validated payload.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use chrono::NaiveDate;
use futures::future::LocalBoxFuture;
use serde_json::Value;
use thiserror::Error;

use crate::shared::http::ApiError;

use super::entity::CollectionEntity;
use super::lookups::{LookupKind, LookupSource};

// ============================================================================
// Draft
// ============================================================================

/// Плоский черновик формы: все значения строками, как в input.value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Значение поля; отсутствующее поле читается как пустая строка
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }
}

// ============================================================================
// Validation errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ошибки проверки формы, по одной на поле
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Проверьте заполнение формы: {}", .errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>().join(", "))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        // First error per field wins
        if self.for_field(field).is_none() {
            self.errors.push(FieldError {
                field: field.to_string(),
                message: message.into(),
            });
        }
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn clear_field(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

/// Ошибка отправки формы
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl FormError {
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(e) => e.to_string(),
            FormError::Api(e) => e.user_message(),
        }
    }
}

// ============================================================================
// Coercion
// ============================================================================

pub const MSG_REQUIRED: &str = "Обязательное поле";
pub const MSG_NUMBER: &str = "Введите число";
pub const MSG_SELECT: &str = "Выберите значение";
pub const MSG_DATE: &str = "Дата в формате ГГГГ-ММ-ДД";

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Reads typed values out of a draft, collecting every field error.
///
/// Failed reads return a placeholder; the payload must only be built after
/// [`FieldReader::finish`] succeeds.
pub struct FieldReader<'a> {
    draft: &'a FormDraft,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(draft: &'a FormDraft) -> Self {
        Self {
            draft,
            errors: ValidationErrors::default(),
        }
    }

    fn raw(&self, name: &str) -> &'a str {
        self.draft.get(name).trim()
    }

    pub fn required_text(&mut self, name: &str) -> String {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.push(name, MSG_REQUIRED);
        }
        raw.to_string()
    }

    pub fn optional_text(&mut self, name: &str) -> Option<String> {
        let raw = self.raw(name);
        (!raw.is_empty()).then(|| raw.to_string())
    }

    pub fn required_number(&mut self, name: &str) -> f64 {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.push(name, MSG_REQUIRED);
            return 0.0;
        }
        parse_number(raw).unwrap_or_else(|| {
            self.errors.push(name, MSG_NUMBER);
            0.0
        })
    }

    pub fn optional_number(&mut self, name: &str) -> Option<f64> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return None;
        }
        let parsed = parse_number(raw);
        if parsed.is_none() {
            self.errors.push(name, MSG_NUMBER);
        }
        parsed
    }

    pub fn required_id(&mut self, name: &str) -> i64 {
        match self.raw(name).parse::<i64>() {
            Ok(id) if id > 0 => id,
            _ => {
                self.errors.push(name, MSG_SELECT);
                0
            }
        }
    }

    pub fn optional_id(&mut self, name: &str) -> Option<i64> {
        let raw = self.raw(name);
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                self.errors.push(name, MSG_SELECT);
                None
            }
        }
    }

    /// Дата `YYYY-MM-DD`, как её отдаёт `<input type="date">`
    pub fn required_date(&mut self, name: &str) -> String {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.push(name, MSG_REQUIRED);
        } else if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
            self.errors.push(name, MSG_DATE);
        }
        raw.to_string()
    }

    /// Значение из фиксированного списка; `parse` возвращает None для чужих значений
    pub fn required_choice<T>(&mut self, name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let raw = self.raw(name);
        if raw.is_empty() {
            self.errors.push(name, MSG_REQUIRED);
            return None;
        }
        let parsed = parse(raw);
        if parsed.is_none() {
            self.errors.push(name, MSG_SELECT);
        }
        parsed
    }

    pub fn flag(&mut self, name: &str) -> bool {
        self.raw(name) == "true"
    }

    /// Дополнительное правило поверх разбора
    pub fn check(&mut self, name: &str, ok: bool, message: &str) {
        if !ok {
            self.errors.push(name, message);
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

// ============================================================================
// Field descriptors
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Textarea,
    Password,
    Checkbox,
    /// Select over a lookup list
    Select(LookupKind),
    /// Select over fixed `(value, label)` pairs
    Choice(fn() -> Vec<(&'static str, &'static str)>),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown only when creating (e.g. password)
    pub create_only: bool,
    /// Shown only when editing (server-driven status)
    pub edit_only: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            create_only: false,
            edit_only: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }

    pub const fn edit_only(mut self) -> Self {
        self.edit_only = true;
        self
    }

    pub fn visible_in(&self, editing: bool) -> bool {
        if editing {
            !self.create_only
        } else {
            !self.edit_only
        }
    }
}

// ============================================================================
// Reactions
// ============================================================================

pub type ReactionFuture = LocalBoxFuture<'static, Result<Value, ApiError>>;
type ReactionFn = Rc<dyn Fn(String) -> ReactionFuture>;

/// Async side fetches keyed by field name (e.g. product → price lookup)
#[derive(Clone, Default)]
pub struct Reactions {
    handlers: HashMap<&'static str, ReactionFn>,
}

impl Reactions {
    pub fn on(mut self, field: &'static str, handler: impl Fn(String) -> ReactionFuture + 'static) -> Self {
        self.handlers.insert(field, Rc::new(handler));
        self
    }

    pub fn handles(&self, field: &str) -> bool {
        self.handlers.contains_key(field)
    }

    /// Future for the reaction on `field`, if one is registered and the value is non-empty
    pub fn dispatch(&self, field: &str, value: &str) -> Option<ReactionFuture> {
        if value.trim().is_empty() {
            return None;
        }
        self.handlers.get(field).map(|h| h(value.to_string()))
    }
}

/// Result of [`FormBridge::set_field`]; carries the revision a reaction result must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub name: String,
    pub value: String,
    pub revision: u64,
}

// ============================================================================
// Model
// ============================================================================

/// Per-entity mapping between records, drafts and payloads.
pub trait FormModel: CollectionEntity {
    fn fields() -> Vec<FieldSpec>;

    /// Справочники, нужные форме
    fn lookups() -> Vec<LookupKind> {
        let mut kinds = Vec::new();
        for field in Self::fields() {
            if let FieldKind::Select(kind) = field.kind {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    fn empty_draft() -> FormDraft {
        FormDraft::new()
    }

    /// Черновик для редактирования существующей записи
    fn to_draft(&self) -> FormDraft;

    fn to_create(draft: &FormDraft) -> Result<Self::Create, ValidationErrors>;

    fn to_update(draft: &FormDraft) -> Result<Self::Update, ValidationErrors>;

    /// Поля, которые сервер не даёт менять; показываются disabled
    fn locked_on_edit(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn reactions<L: LookupSource + Clone + 'static>(_source: &L) -> Reactions {
        Reactions::default()
    }

    /// Applies a reaction result to the draft (e.g. pre-fill the price)
    fn apply_derived(_draft: &mut FormDraft, _field: &str, _value: &Value) {}
}

// ============================================================================
// Bridge
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBridge {
    draft: FormDraft,
    derived: BTreeMap<String, Value>,
    revisions: BTreeMap<String, u64>,
    errors: ValidationErrors,
}

impl FormBridge {
    pub fn new(draft: FormDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.errors.for_field(name)
    }

    pub fn derived(&self, name: &str) -> Option<&Value> {
        self.derived.get(name)
    }

    /// Shallow merge; drops the field's previous error and derived value.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> FieldChange {
        let value = value.into();
        self.draft.set_field(name, value.clone());
        self.errors.clear_field(name);
        self.derived.remove(name);
        let revision = self.revisions.entry(name.to_string()).or_insert(0);
        *revision += 1;
        FieldChange {
            name: name.to_string(),
            value,
            revision: *revision,
        }
    }

    pub fn is_current(&self, change: &FieldChange) -> bool {
        self.revisions.get(&change.name) == Some(&change.revision)
    }

    /// Stores a reaction result unless the field changed again meanwhile.
    pub fn store_reaction<M: FormModel>(&mut self, change: &FieldChange, value: Value) -> bool {
        if !self.is_current(change) {
            log::debug!("stale reaction for '{}' discarded", change.name);
            return false;
        }
        M::apply_derived(&mut self.draft, &change.name, &value);
        self.derived.insert(change.name.clone(), value);
        true
    }

    pub fn to_create<M: FormModel>(&mut self) -> Result<M::Create, ValidationErrors> {
        let result = M::to_create(&self.draft);
        self.remember(result)
    }

    pub fn to_update<M: FormModel>(&mut self) -> Result<M::Update, ValidationErrors> {
        let result = M::to_update(&self.draft);
        self.remember(result)
    }

    fn remember<T>(&mut self, result: Result<T, ValidationErrors>) -> Result<T, ValidationErrors> {
        match &result {
            Ok(_) => self.errors = ValidationErrors::default(),
            Err(errors) => self.errors = errors.clone(),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::testing::{rec, TestRecord};
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_reader_coerces_values() {
        let draft = FormDraft::from_pairs([
            ("weight", " 12,5 "),
            ("productId", "4"),
            ("notes", ""),
            ("date", "2024-03-01"),
        ]);
        let mut r = FieldReader::new(&draft);
        assert_eq!(r.required_number("weight"), 12.5);
        assert_eq!(r.required_id("productId"), 4);
        assert_eq!(r.optional_text("notes"), None);
        assert_eq!(r.optional_id("driverId"), None);
        assert_eq!(r.required_date("date"), "2024-03-01");
        assert!(r.finish().is_ok());
    }

    #[test]
    fn test_reader_collects_every_error() {
        let draft = FormDraft::from_pairs([("weight", "abc"), ("date", "01.03.2024")]);
        let mut r = FieldReader::new(&draft);
        r.required_number("weight");
        r.required_id("productId");
        r.required_date("date");
        r.optional_number("price");
        let errors = r.finish().unwrap_err();
        assert_eq!(errors.for_field("weight"), Some(MSG_NUMBER));
        assert_eq!(errors.for_field("productId"), Some(MSG_SELECT));
        assert_eq!(errors.for_field("date"), Some(MSG_DATE));
        assert_eq!(errors.for_field("price"), None);
        assert_eq!(errors.iter().count(), 3);
    }

    #[test]
    fn test_non_numeric_weight_is_rejected() {
        let mut bridge = FormBridge::new(TestRecord::empty_draft());
        bridge.set_field("name", "batch");
        bridge.set_field("weight", "abc");
        let errors = bridge.to_create::<TestRecord>().unwrap_err();
        assert_eq!(errors.for_field("weight"), Some(MSG_NUMBER));
        assert_eq!(bridge.field_error("weight"), Some(MSG_NUMBER));

        bridge.set_field("weight", "3");
        assert!(bridge.field_error("weight").is_none());
        let payload = bridge.to_create::<TestRecord>().unwrap();
        assert_eq!(payload.weight, Some(3.0));
        assert!(bridge.errors().is_empty());
    }

    #[test]
    fn test_edit_draft_prefills_from_record() {
        let bridge = FormBridge::new(rec(7, "seven").to_draft());
        assert_eq!(bridge.draft().get("name"), "seven");
        assert_eq!(bridge.draft().get("missing"), "");
    }

    #[test]
    fn test_stale_reaction_result_is_discarded() {
        let mut bridge = FormBridge::default();
        let first = bridge.set_field("weight", "1");
        let second = bridge.set_field("weight", "2");
        assert!(!bridge.store_reaction::<TestRecord>(&first, json!(10)));
        assert!(bridge.derived("weight").is_none());
        assert!(bridge.store_reaction::<TestRecord>(&second, json!(20)));
        assert_eq!(bridge.derived("weight"), Some(&json!(20)));
    }

    #[test]
    fn test_reactions_dispatch_by_field() {
        let reactions = Reactions::default().on("productId", |id| {
            Box::pin(async move { Ok(json!({ "productId": id })) })
        });
        assert!(reactions.handles("productId"));
        assert!(reactions.dispatch("productId", "").is_none());
        assert!(reactions.dispatch("name", "x").is_none());
        let fut = reactions.dispatch("productId", "5").unwrap();
        assert_eq!(block_on(fut).unwrap(), json!({ "productId": "5" }));
    }
}
