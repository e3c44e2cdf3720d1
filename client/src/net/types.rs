//! Wire DTOs for the grants REST API.
//!
//! DESIGN
//! ======
//! These types mirror the backend's public models so a fetched record can be
//! re-serialized without loss. Server-assigned fields (`id`, timestamps) are
//! optional on types the client also constructs, and are skipped when absent
//! so drafts never carry placeholder identities.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ENVELOPES
// =============================================================================

/// Paginated list envelope returned by every collection endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub count: i64,
}

/// Token issued by `/login/access-token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

// =============================================================================
// RULES
// =============================================================================

/// Comparison operator shared by filters and conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "IN")]
    In,
}

impl Operator {
    /// Operators offered by the rule editor. `IN` is accepted on the wire but
    /// not offered for new clauses.
    pub const EDITABLE: [Self; 6] = [Self::Eq, Self::NotEq, Self::Gt, Self::Lt, Self::GtEq, Self::LtEq];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::In => "IN",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "=" => Ok(Self::Eq),
            "!=" => Ok(Self::NotEq),
            ">" => Ok(Self::Gt),
            "<" => Ok(Self::Lt),
            ">=" => Ok(Self::GtEq),
            "<=" => Ok(Self::LtEq),
            "IN" | "in" => Ok(Self::In),
            other => Err(format!("unknown operator: {other}")),
        }
    }
}

/// Aggregation applied by budget rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregator {
    Sum,
    Max,
    Min,
    Avg,
    Count,
}

impl Aggregator {
    /// Aggregators offered by the rule editor.
    pub const EDITABLE: [Self; 2] = [Self::Max, Self::Sum];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "SUM",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Avg => "AVG",
            Self::Count => "COUNT",
        }
    }
}

impl FromStr for Aggregator {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SUM" => Ok(Self::Sum),
            "MAX" => Ok(Self::Max),
            "MIN" => Ok(Self::Min),
            "AVG" => Ok(Self::Avg),
            "COUNT" => Ok(Self::Count),
            other => Err(format!("unknown aggregator: {other}")),
        }
    }
}

/// What a rule is evaluated against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    #[default]
    Expense,
    Budget,
}

impl RuleType {
    pub const ALL: [Self; 2] = [Self::Expense, Self::Budget];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Budget => "budget",
        }
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "expense" => Ok(Self::Expense),
            "budget" => Ok(Self::Budget),
            other => Err(format!("unknown rule type: {other}")),
        }
    }
}

/// One comparison clause selecting which records a rule applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFilter {
    /// Server-assigned; absent until the parent rule is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Record attribute to compare (e.g. `"amount"`, `"date"`).
    pub field: String,
    pub operator: Operator,
    /// Comparison value as free text; interpreted by the backend.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// An ordered comparison clause a rule asserts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Server-assigned; absent until the parent rule is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub field: String,
    pub operator: Operator,
    pub value: String,
    /// Evaluation sequence position. Not renumbered when siblings are removed.
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A named, grant-scoped constraint with its nested filters and conditions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub grant_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub rule_type: RuleType,
    #[serde(default)]
    pub aggregator: Option<Aggregator>,
    pub error_message: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub filters: Vec<RuleFilter>,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// GRANTS, EXPENSES, APPROVALS
// =============================================================================

/// A funded project; expenses, rules, and roles are scoped to one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub funding_agency: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default = "default_grant_status")]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn default_grant_status() -> String {
    "active".to_owned()
}

/// A spend recorded against a grant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: f64,
    pub date: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub grant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Decision recorded on an expense.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// An approval or rejection of one expense.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub expense_id: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Expense classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub code: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Grant-level spending summary from `/grant-projection/{grant_id}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub grant_id: String,
    pub grant_total_funds: f64,
    pub existing_expense_amount: f64,
    pub projected_expense_amount: f64,
    pub grant_projected_remaining_funds: f64,
    pub grant_current_remaining_funds: f64,
}

// =============================================================================
// USERS & ROLES
// =============================================================================

/// A dashboard account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Body of `POST /users/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// Body of `PATCH /users/{id}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<&User> for UserUpdate {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            is_superuser: user.is_superuser,
        }
    }
}

/// Role tier a user holds on a grant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Owner,
    Admin,
    #[default]
    User,
}

impl RoleType {
    pub const ALL: [Self; 3] = [Self::Owner, Self::Admin, Self::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl FromStr for RoleType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("unknown role type: {other}")),
        }
    }
}

/// Grant-scoped permission tags.
pub const PERMISSIONS: [&str; 11] = [
    "approve_expenses",
    "create_rules",
    "manage_roles",
    "view_budget",
    "view_expenses",
    "edit_expenses",
    "submit_expenses",
    "manage_grant",
    "archive_grant",
    "view_grant",
    "edit_grant",
];

/// A user's role assignment on one grant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub grant_id: String,
    pub user_id: String,
    pub role_type: RoleType,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

// =============================================================================
// NUMBER COERCION
// =============================================================================

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
