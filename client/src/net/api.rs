//! Typed REST client for the grants backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view talks to the backend through one `ApiClient` provided via
//! context. The client reads the bearer token from the injected `Session` on
//! each call, so a missing token short-circuits before anything is sent.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>`; failures are logged here once and
//! surfaced by the calling view as a toast. There are no retries. A missing
//! token or a `401` clears the session and fires the rejection handler, which
//! the app uses to send the operator back to sign-in.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Method, Transport, encode_segment, with_query};
use super::types::{
    Approval, Category, Expense, Grant, NewUser, Page, Projection, Role, RoleType, Rule, Token, User, UserUpdate,
};
use crate::state::session::Session;

/// Path prefix of every backend endpoint.
pub const API_BASE: &str = "/api/v1";

/// `skip`/`limit` pagination window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { skip: 0, limit: 100 }
    }
}

impl PageRequest {
    fn query(self) -> [(&'static str, String); 2] {
        [("skip", self.skip.to_string()), ("limit", self.limit.to_string())]
    }
}

/// A backend record with standard collection CRUD endpoints.
pub trait Resource: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection path below `API_BASE`, with trailing slash.
    const COLLECTION: &'static str;

    /// Server-assigned identifier; `None` for unsaved drafts.
    fn id(&self) -> Option<&str>;
}

impl Resource for Grant {
    const COLLECTION: &'static str = "/grants/";
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Resource for Expense {
    const COLLECTION: &'static str = "/grant-expenses/";
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Resource for Approval {
    const COLLECTION: &'static str = "/grant-approvals/";
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Resource for Category {
    const COLLECTION: &'static str = "/grant-categories/";
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Resource for Role {
    const COLLECTION: &'static str = "/grant-roles/";
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "/users/";
    fn id(&self) -> Option<&str> {
        if self.id.is_empty() { None } else { Some(&self.id) }
    }
}

impl Resource for Rule {
    const COLLECTION: &'static str = "/rules/";
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

fn collection_endpoint<R: Resource>() -> String {
    format!("{API_BASE}{}", R::COLLECTION)
}

fn item_endpoint<R: Resource>(id: &str) -> String {
    format!("{API_BASE}{}{}", R::COLLECTION, encode_segment(id))
}

fn token_endpoint() -> String {
    format!("{API_BASE}/login/access-token")
}

fn grant_rules_endpoint(grant_id: &str) -> String {
    format!("{API_BASE}/rules/grant/{}", encode_segment(grant_id))
}

fn rule_templates_endpoint() -> String {
    format!("{API_BASE}/rules/templates")
}

fn rule_template_endpoint(grant_id: &str, template: &str) -> String {
    format!(
        "{API_BASE}/rules/grant/{}/template/{}",
        encode_segment(grant_id),
        encode_segment(template)
    )
}

fn grant_roles_endpoint(grant_id: &str) -> String {
    format!("{API_BASE}/grant-roles/grant/{}", encode_segment(grant_id))
}

fn assign_role_endpoint(grant_id: &str, user_id: &str) -> String {
    format!(
        "{API_BASE}/grant-roles/grant/{}/user/{}",
        encode_segment(grant_id),
        encode_segment(user_id)
    )
}

fn pending_expenses_endpoint() -> String {
    format!("{API_BASE}/grant-approvals/pending-expenses")
}

fn projection_endpoint(grant_id: &str) -> String {
    format!("{API_BASE}/grant-projection/{}", encode_segment(grant_id))
}

fn paged(path: &str, page: PageRequest) -> String {
    let query = page.query();
    let pairs = query.iter().map(|(k, v)| (*k, v.as_str())).collect::<Vec<_>>();
    with_query(path, &pairs)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Callback run when the backend no longer accepts the session.
pub type RejectionHandler = Arc<dyn Fn() + Send + Sync>;

/// REST client bound to a transport and the operator's session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
    on_rejected: Option<RejectionHandler>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session, on_rejected: None }
    }

    /// Run `handler` whenever a call fails with `requires_sign_in`.
    #[must_use]
    pub fn with_rejection_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_rejected = Some(Arc::new(handler));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start an authorized request, failing locally when no token is stored.
    fn authorized(&self, method: Method, url: String) -> Result<ApiRequest, ApiError> {
        let Some(token) = self.session.token() else {
            return Err(self.rejected(ApiError::MissingCredential));
        };
        Ok(ApiRequest::new(method, url).with_bearer(token))
    }

    /// Clear the session and notify the handler when `err` means the stored
    /// token is gone or stale.
    fn rejected(&self, err: ApiError) -> ApiError {
        if err.requires_sign_in() {
            self.session.sign_out();
            if let Some(handler) = &self.on_rejected {
                handler();
            }
        }
        err
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let result = self.transport.send(request).await.and_then(|resp| {
            if resp.is_success() {
                Ok(resp)
            } else {
                Err(ApiError::from_status(resp.status, &resp.body))
            }
        });
        result.map_err(|e| {
            leptos::logging::warn!("{} {url} failed: {e}", method.as_str());
            self.rejected(e)
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let resp = self.execute(request).await?;
        serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn execute_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.execute(request).await.map(|_| ())
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// Exchange credentials for a token via the OAuth2 password grant and
    /// store it in the session.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection or a transport failure.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Token, ApiError> {
        let form = vec![
            ("grant_type".to_owned(), "password".to_owned()),
            ("username".to_owned(), email.to_owned()),
            ("password".to_owned(), password.to_owned()),
            ("scope".to_owned(), String::new()),
            ("client_id".to_owned(), String::new()),
            ("client_secret".to_owned(), String::new()),
        ];
        let request = ApiRequest::new(Method::Post, token_endpoint()).with_form(form);
        let token: Token = self.fetch_json(request).await?;
        self.session.sign_in(&token.access_token);
        Ok(token)
    }

    // =========================================================================
    // GENERIC COLLECTIONS
    // =========================================================================

    /// `GET {collection}?skip=&limit=`
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn list<R: Resource>(&self, page: PageRequest) -> Result<Page<R>, ApiError> {
        let request = self.authorized(Method::Get, paged(&collection_endpoint::<R>(), page))?;
        self.fetch_json(request).await
    }

    /// `GET {collection}{id}`
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn fetch<R: Resource>(&self, id: &str) -> Result<R, ApiError> {
        let request = self.authorized(Method::Get, item_endpoint::<R>(id))?;
        self.fetch_json(request).await
    }

    /// `POST {collection}` with the record as body.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn create<R: Resource>(&self, record: &R) -> Result<R, ApiError> {
        let request = self.authorized(Method::Post, collection_endpoint::<R>())?.with_json(to_json(record)?);
        self.fetch_json(request).await
    }

    /// `PUT {collection}{id}` with the whole record as body.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn replace<R: Resource>(&self, id: &str, record: &R) -> Result<R, ApiError> {
        let request = self.authorized(Method::Put, item_endpoint::<R>(id))?.with_json(to_json(record)?);
        self.fetch_json(request).await
    }

    /// `DELETE {collection}{id}`
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<(), ApiError> {
        let request = self.authorized(Method::Delete, item_endpoint::<R>(id))?;
        self.execute_unit(request).await
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// `PATCH /users/{id}` with the editable user fields.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> Result<User, ApiError> {
        let request = self.authorized(Method::Patch, item_endpoint::<User>(id))?.with_json(to_json(update)?);
        self.fetch_json(request).await
    }

    /// `POST /users/` with a password-bearing body.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        let request = self.authorized(Method::Post, collection_endpoint::<User>())?.with_json(to_json(user)?);
        self.fetch_json(request).await
    }

    // =========================================================================
    // RULES
    // =========================================================================

    /// Rules scoped to one grant.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn grant_rules(&self, grant_id: &str) -> Result<Page<Rule>, ApiError> {
        let request = self.authorized(Method::Get, grant_rules_endpoint(grant_id))?;
        self.fetch_json(request).await
    }

    /// Submit a new rule aggregate with its nested filters and conditions.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn create_rule(&self, rule: &Rule) -> Result<Rule, ApiError> {
        self.create(rule).await
    }

    /// Replace an existing rule aggregate.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn update_rule(&self, id: &str, rule: &Rule) -> Result<Rule, ApiError> {
        self.replace(id, rule).await
    }

    /// Names of the server-side rule templates.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn rule_templates(&self) -> Result<Vec<String>, ApiError> {
        let request = self.authorized(Method::Get, rule_templates_endpoint())?;
        self.fetch_json(request).await
    }

    /// Instantiate template `name` for `grant_id`; `kwargs` overrides template
    /// parameters and is passed as a JSON query value.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn create_rule_from_template(
        &self,
        grant_id: &str,
        name: &str,
        kwargs: &serde_json::Value,
    ) -> Result<Rule, ApiError> {
        let kwargs = kwargs.to_string();
        let url = with_query(&rule_template_endpoint(grant_id, name), &[("kwargs", kwargs.as_str())]);
        let request = self.authorized(Method::Post, url)?;
        self.fetch_json(request).await
    }

    // =========================================================================
    // ROLES, APPROVALS, PROJECTION
    // =========================================================================

    /// Role assignments on one grant.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn grant_roles(&self, grant_id: &str) -> Result<Page<Role>, ApiError> {
        let request = self.authorized(Method::Get, grant_roles_endpoint(grant_id))?;
        self.fetch_json(request).await
    }

    /// Give `user_id` a role on `grant_id` with explicit permissions.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn assign_role(
        &self,
        grant_id: &str,
        user_id: &str,
        role_type: RoleType,
        permissions: &[String],
    ) -> Result<Role, ApiError> {
        let url = with_query(&assign_role_endpoint(grant_id, user_id), &[("role_type", role_type.as_str())]);
        let request = self
            .authorized(Method::Post, url)?
            .with_json(serde_json::json!({ "permissions": permissions }));
        self.fetch_json(request).await
    }

    /// Expenses that have no approval decision yet.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn pending_expenses(&self, page: PageRequest) -> Result<Page<Expense>, ApiError> {
        let request = self.authorized(Method::Get, paged(&pending_expenses_endpoint(), page))?;
        self.fetch_json(request).await
    }

    /// Spending summary for one grant.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` without sending when signed out.
    pub async fn projection(&self, grant_id: &str) -> Result<Projection, ApiError> {
        let request = self.authorized(Method::Get, projection_endpoint(grant_id))?;
        self.fetch_json(request).await
    }
}
