use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::RemoteError;

mod client;
#[cfg(any(test, feature = "testing"))]
mod memory;

pub use client::PortfolioApi;
#[cfg(any(test, feature = "testing"))]
pub use memory::{Call, MemoryBackend};

/// Content sections that have their own list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Experience,
    Projects,
    Skills,
    Education,
    Certifications,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Education,
        Section::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Education => "education",
            Section::Certifications => "certifications",
        }
    }

    /// Path segment under `/portfolio/{userId}/`.
    pub fn path(&self) -> &'static str {
        self.as_str()
    }

    pub fn endpoints(&self) -> SectionEndpoints {
        match self {
            Section::Experience | Section::Projects | Section::Skills => SectionEndpoints::FULL,
            Section::Education | Section::Certifications => SectionEndpoints::APPEND_ONLY,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown section type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// User-facing message when a failure carries no text of its own.
    pub fn default_message(&self, section: Section) -> String {
        match self {
            Operation::Load => format!("Failed to load {}", section),
            _ => format!("Failed to {} {} item", self.verb(), section),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Load => "Load",
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        })
    }
}

/// Which item endpoints the backend exposes for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionEndpoints {
    pub list: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

impl SectionEndpoints {
    pub const FULL: Self = Self { list: true, create: true, update: true, delete: true };
    pub const APPEND_ONLY: Self = Self { list: true, create: true, update: false, delete: false };

    pub fn supports(&self, op: Operation) -> bool {
        match op {
            Operation::Load => self.list,
            Operation::Create => self.create,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}

/// Check a mutation against the section's endpoints before any I/O happens.
pub fn ensure_supported(section: Section, operation: Operation) -> Result<(), RemoteError> {
    if section.endpoints().supports(operation) {
        Ok(())
    } else {
        Err(RemoteError::Unsupported { section, operation })
    }
}

/// The backend contract the loader and the section accessor are written against.
///
/// Every call is attempted once; bodies come back as raw JSON so callers decide
/// how strict to be about shape.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    fn default_user(&self) -> &str;

    /// Idempotent best-effort initialization of default content.
    async fn seed(&self) -> Result<Value, RemoteError>;

    /// Aggregate payload: `portfolio.{stats,personalInfo}` plus section lists.
    async fn portfolio(&self, user_id: &str) -> Result<Value, RemoteError>;

    async fn update_portfolio(&self, user_id: &str, payload: &Value) -> Result<Value, RemoteError>;

    async fn list(&self, user_id: &str, section: Section) -> Result<Value, RemoteError>;

    async fn create(&self, user_id: &str, section: Section, payload: &Value) -> Result<Value, RemoteError>;

    async fn update(
        &self,
        user_id: &str,
        section: Section,
        id: &str,
        payload: &Value,
    ) -> Result<Value, RemoteError>;

    async fn delete(&self, user_id: &str, section: Section, id: &str) -> Result<Value, RemoteError>;
}

#[async_trait]
impl<T: PortfolioBackend + ?Sized> PortfolioBackend for Arc<T> {
    fn default_user(&self) -> &str {
        (**self).default_user()
    }

    async fn seed(&self) -> Result<Value, RemoteError> {
        (**self).seed().await
    }

    async fn portfolio(&self, user_id: &str) -> Result<Value, RemoteError> {
        (**self).portfolio(user_id).await
    }

    async fn update_portfolio(&self, user_id: &str, payload: &Value) -> Result<Value, RemoteError> {
        (**self).update_portfolio(user_id, payload).await
    }

    async fn list(&self, user_id: &str, section: Section) -> Result<Value, RemoteError> {
        (**self).list(user_id, section).await
    }

    async fn create(&self, user_id: &str, section: Section, payload: &Value) -> Result<Value, RemoteError> {
        (**self).create(user_id, section, payload).await
    }

    async fn update(
        &self,
        user_id: &str,
        section: Section,
        id: &str,
        payload: &Value,
    ) -> Result<Value, RemoteError> {
        (**self).update(user_id, section, id, payload).await
    }

    async fn delete(&self, user_id: &str, section: Section, id: &str) -> Result<Value, RemoteError> {
        (**self).delete(user_id, section, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_round_trip_names() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
        assert!("contact".parse::<Section>().is_err());
    }

    #[test]
    fn test_append_only_sections() {
        assert!(ensure_supported(Section::Projects, Operation::Delete).is_ok());
        assert!(ensure_supported(Section::Education, Operation::Create).is_ok());
        assert_eq!(
            ensure_supported(Section::Certifications, Operation::Update),
            Err(RemoteError::Unsupported {
                section: Section::Certifications,
                operation: Operation::Update,
            })
        );
    }

    #[test]
    fn test_default_messages() {
        assert_eq!(Operation::Load.default_message(Section::Skills), "Failed to load skills");
        assert_eq!(
            Operation::Create.default_message(Section::Projects),
            "Failed to create projects item"
        );
    }
}
