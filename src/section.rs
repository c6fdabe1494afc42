//! CRUD accessor for a single content section.
//!
//! Unlike the main-page loader this never falls back to bundled data: every
//! failure lands in `error()` and is returned to the caller. Successful
//! mutations are followed by a full reload of the list.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{Operation, PortfolioBackend, Section, SectionEndpoints};
use crate::error::{RemoteError, SectionError};
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::model;

pub struct SectionAccessor<B> {
    backend: B,
    section: Section,
    endpoints: SectionEndpoints,
    data: Vec<Value>,
    loading: bool,
    error: Option<String>,
}

impl<B: PortfolioBackend> SectionAccessor<B> {
    pub fn new(backend: B, section: Section) -> Self {
        Self {
            backend,
            section,
            endpoints: section.endpoints(),
            data: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The current list decoded as the section's model type.
    pub fn items<T: DeserializeOwned>(&self) -> Vec<T> {
        model::section(Some(&Value::Array(self.data.clone())))
    }

    pub async fn load_data(&mut self) -> Result<&[Value], SectionError> {
        self.loading = true;
        self.error = None;

        let user = self.backend.default_user().to_string();
        let result = self.backend.list(&user, self.section).await.and_then(|body| match body {
            Value::Array(items) => Ok(items),
            other => Err(RemoteError::Decode {
                endpoint: format!("/portfolio/{}/{}", user, self.section.path()),
                message: format!("expected a list, got {}", json_kind(&other)),
            }),
        });
        self.loading = false;

        match result {
            Ok(items) => {
                self.data = items;
                Ok(&self.data)
            }
            Err(err) => Err(self.fail(Operation::Load, err.into())),
        }
    }

    /// Create an item and reload. Returns the backend's create response.
    pub async fn create_item(&mut self, payload: &Value) -> Result<Value, SectionError> {
        self.error = None;
        let user = self.backend.default_user().to_string();
        let created = match self.backend.create(&user, self.section, payload).await {
            Ok(created) => created,
            Err(err) => return Err(self.fail(Operation::Create, err.into())),
        };
        self.reload().await;
        Ok(created)
    }

    pub async fn update_item(&mut self, id: &str, payload: &Value) -> Result<Value, SectionError> {
        self.error = None;
        self.check(Operation::Update)?;
        let user = self.backend.default_user().to_string();
        let updated = match self.backend.update(&user, self.section, id, payload).await {
            Ok(updated) => updated,
            Err(err) => return Err(self.fail(Operation::Update, err.into())),
        };
        self.reload().await;
        Ok(updated)
    }

    pub async fn delete_item(&mut self, id: &str) -> Result<(), SectionError> {
        self.error = None;
        self.check(Operation::Delete)?;
        let user = self.backend.default_user().to_string();
        if let Err(err) = self.backend.delete(&user, self.section, id).await {
            return Err(self.fail(Operation::Delete, err.into()));
        }
        self.reload().await;
        Ok(())
    }

    fn check(&mut self, operation: Operation) -> Result<(), SectionError> {
        if self.endpoints.supports(operation) {
            return Ok(());
        }
        let err = SectionError::Unsupported {
            section: self.section,
            operation,
        };
        Err(self.fail(operation, err))
    }

    /// Reload after a successful mutation; a failed reload is already recorded in `error`.
    async fn reload(&mut self) {
        let _ = self.load_data().await;
    }

    /// Record a failure. A remote error with no detail is shown as the
    /// operation's generic message instead.
    fn fail(&mut self, operation: Operation, err: SectionError) -> SectionError {
        let message = match &err {
            SectionError::Remote(remote) if remote.detail().is_some_and(str::is_empty) => {
                operation.default_message(self.section)
            }
            _ => err.to_string(),
        };
        log(
            Level::Error,
            Domain::Section,
            "section.failed",
            obj(&[
                ("section", v_str(self.section.as_str())),
                ("operation", v_str(operation.verb())),
                ("msg", v_str(&message)),
            ]),
        );
        self.error = Some(message);
        err
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
