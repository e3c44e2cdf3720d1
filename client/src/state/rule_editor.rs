//! Rule editor state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The rule editor page holds one `RuleEditor` in a signal. Form inputs turn
//! into edit calls here, and the submit button drives `begin_submit` /
//! `send` / `finish_submit`. Nothing in this module touches the DOM, so every
//! transition is unit-tested natively.
//!
//! DESIGN
//! ======
//! Phases run `Idle -> Editing -> Submitting -> Idle | Editing`. Filters and
//! conditions are replaced copy-on-write on every edit. A second submit while
//! one is in flight is refused. Removing a condition never renumbers the
//! `order` of the others.

#[cfg(test)]
#[path = "rule_editor_test.rs"]
mod rule_editor_test;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{Aggregator, Operator, Rule, RuleCondition, RuleFilter, RuleType};
use crate::util::collection::{append, remove_at, update_at};

/// Where the editor is in its submit cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorPhase {
    /// Nothing changed since the last load or successful submit.
    Idle,
    /// Local edits not yet submitted, or a failed submit awaiting retry.
    Editing,
    /// A request is in flight.
    Submitting(SubmitMode),
}

/// Whether a submit creates a new rule or replaces an existing one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    Create,
    Update(String),
}

/// Header field edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderEdit {
    Name(String),
    Description(String),
    RuleType(RuleType),
    Aggregator(Option<Aggregator>),
    ErrorMessage(String),
    Active(bool),
    GrantId(String),
}

/// Filter field edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterEdit {
    Field(String),
    Operator(Operator),
    Value(String),
}

/// Condition field edit. `Order` carries the raw input text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionEdit {
    Field(String),
    Operator(Operator),
    Value(String),
    Order(String),
}

/// Result of an indexed clause edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Index past the end; nothing changed.
    OutOfRange,
    /// Input rejected; nothing changed.
    Invalid(String),
}

/// Snapshot handed to `send` when a submit starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitRequest {
    pub mode: SubmitMode,
    pub rule: Rule,
}

/// What the page should do after a submit settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// New rule persisted; leave the editor for the rule list.
    Created(Rule),
    /// Existing rule replaced with the server copy.
    Updated,
    /// Request failed; edits kept. Carries the toast text.
    Failed(String),
    /// No submit was in flight.
    Ignored,
}

/// In-memory draft of one rule aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleEditor {
    pub rule: Rule,
    pub phase: EditorPhase,
    pub last_error: Option<String>,
}

fn blank_rule(grant_id: &str) -> Rule {
    Rule { grant_id: grant_id.to_owned(), is_active: true, ..Rule::default() }
}

fn parse_order(raw: &str) -> Result<i64, String> {
    raw.trim().parse::<i64>().map_err(|_| format!("order must be a whole number: {raw}"))
}

impl RuleEditor {
    /// Blank draft scoped to `grant_id`.
    pub fn new(grant_id: &str) -> Self {
        Self { rule: blank_rule(grant_id), phase: EditorPhase::Idle, last_error: None }
    }

    /// Draft seeded from a fetched rule.
    pub fn load(rule: Rule) -> Self {
        Self { rule, phase: EditorPhase::Idle, last_error: None }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, EditorPhase::Submitting(_))
    }

    /// True when the draft targets an existing rule.
    pub fn is_update(&self) -> bool {
        self.rule.id.is_some()
    }

    fn touch(&mut self) {
        if self.phase == EditorPhase::Idle {
            self.phase = EditorPhase::Editing;
        }
    }

    // =========================================================================
    // HEADER
    // =========================================================================

    pub fn edit_header(&mut self, edit: HeaderEdit) {
        match edit {
            HeaderEdit::Name(name) => self.rule.name = name,
            HeaderEdit::Description(text) => {
                self.rule.description = if text.is_empty() { None } else { Some(text) };
            }
            HeaderEdit::RuleType(rule_type) => self.rule.rule_type = rule_type,
            HeaderEdit::Aggregator(aggregator) => self.rule.aggregator = aggregator,
            HeaderEdit::ErrorMessage(message) => self.rule.error_message = message,
            HeaderEdit::Active(active) => self.rule.is_active = active,
            HeaderEdit::GrantId(grant_id) => self.rule.grant_id = grant_id,
        }
        self.touch();
    }

    // =========================================================================
    // FILTERS
    // =========================================================================

    pub fn add_filter(&mut self) {
        self.rule.filters = append(&self.rule.filters, RuleFilter::default());
        self.touch();
    }

    pub fn update_filter(&mut self, index: usize, edit: FilterEdit) -> EditOutcome {
        let next = update_at(&self.rule.filters, index, |filter| match edit {
            FilterEdit::Field(field) => filter.field = field,
            FilterEdit::Operator(operator) => filter.operator = operator,
            FilterEdit::Value(value) => filter.value = value,
        });
        let Some(next) = next else {
            return EditOutcome::OutOfRange;
        };
        self.rule.filters = next;
        self.touch();
        EditOutcome::Applied
    }

    pub fn remove_filter(&mut self, index: usize) -> EditOutcome {
        let Some(next) = remove_at(&self.rule.filters, index) else {
            return EditOutcome::OutOfRange;
        };
        self.rule.filters = next;
        self.touch();
        EditOutcome::Applied
    }

    // =========================================================================
    // CONDITIONS
    // =========================================================================

    pub fn add_condition(&mut self) {
        self.rule.conditions = append(&self.rule.conditions, RuleCondition::default());
        self.touch();
    }

    pub fn update_condition(&mut self, index: usize, edit: ConditionEdit) -> EditOutcome {
        if index >= self.rule.conditions.len() {
            return EditOutcome::OutOfRange;
        }
        let order = match &edit {
            ConditionEdit::Order(raw) => match parse_order(raw) {
                Ok(order) => Some(order),
                Err(message) => return EditOutcome::Invalid(message),
            },
            _ => None,
        };
        let next = update_at(&self.rule.conditions, index, |condition| match edit {
            ConditionEdit::Field(field) => condition.field = field,
            ConditionEdit::Operator(operator) => condition.operator = operator,
            ConditionEdit::Value(value) => condition.value = value,
            ConditionEdit::Order(_) => condition.order = order.unwrap_or(condition.order),
        });
        let Some(next) = next else {
            return EditOutcome::OutOfRange;
        };
        self.rule.conditions = next;
        self.touch();
        EditOutcome::Applied
    }

    pub fn remove_condition(&mut self, index: usize) -> EditOutcome {
        let Some(next) = remove_at(&self.rule.conditions, index) else {
            return EditOutcome::OutOfRange;
        };
        self.rule.conditions = next;
        self.touch();
        EditOutcome::Applied
    }

    // =========================================================================
    // SUBMIT
    // =========================================================================

    /// Enter `Submitting` and snapshot the aggregate. Returns `None` while a
    /// submit is already in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.is_submitting() {
            return None;
        }
        let mode = match &self.rule.id {
            Some(id) => SubmitMode::Update(id.clone()),
            None => SubmitMode::Create,
        };
        self.phase = EditorPhase::Submitting(mode.clone());
        self.last_error = None;
        Some(SubmitRequest { mode, rule: self.rule.clone() })
    }

    /// Settle the in-flight submit with the server's answer.
    pub fn finish_submit(&mut self, result: Result<Rule, ApiError>) -> SubmitOutcome {
        let EditorPhase::Submitting(mode) = self.phase.clone() else {
            return SubmitOutcome::Ignored;
        };
        match (mode, result) {
            (SubmitMode::Create, Ok(created)) => {
                *self = Self::new(&self.rule.grant_id);
                SubmitOutcome::Created(created)
            }
            (SubmitMode::Update(_), Ok(updated)) => {
                *self = Self::load(updated);
                SubmitOutcome::Updated
            }
            (_, Err(err)) => {
                let message = err.to_string();
                self.phase = EditorPhase::Editing;
                self.last_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// Send a submit snapshot: POST for new rules, PUT for existing ones.
///
/// # Errors
///
/// Returns the `ApiError` from the underlying call.
pub async fn send(api: &ApiClient, request: &SubmitRequest) -> Result<Rule, ApiError> {
    match &request.mode {
        SubmitMode::Create => api.create_rule(&request.rule).await,
        SubmitMode::Update(id) => api.update_rule(id, &request.rule).await,
    }
}
