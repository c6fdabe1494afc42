use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::api::{ensure_supported, Operation, PortfolioBackend, Section};
use crate::config::DEFAULT_USER_ID;
use crate::defaults::default_dataset;
use crate::error::RemoteError;

/// A backend call, as counted and scripted by [`MemoryBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Seed,
    Portfolio,
    UpdatePortfolio,
    List(Section),
    Create(Section),
    Update(Section),
    Delete(Section),
}

struct Scripted {
    delay: Duration,
    result: Result<Value, RemoteError>,
}

#[derive(Default)]
struct Store {
    portfolio: Option<Map<String, Value>>,
    sections: HashMap<Section, Vec<Value>>,
    next_id: u64,
    calls: HashMap<Call, usize>,
    scripts: HashMap<Call, VecDeque<Scripted>>,
}

impl Store {
    fn assign_id(&mut self, mut item: Value) -> Value {
        self.next_id += 1;
        if let Value::Object(fields) = &mut item {
            fields.insert("id".to_string(), json!(self.next_id.to_string()));
        }
        item
    }

    fn items(&mut self, section: Section) -> &mut Vec<Value> {
        self.sections.entry(section).or_default()
    }
}

/// In-process implementation of the backend contract.
///
/// Seeding loads the bundled dataset. Calls are counted, and any call can be
/// scripted to answer differently (or fail, or stall) ahead of the store.
pub struct MemoryBackend {
    user_id: String,
    store: Mutex<Store>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            store: Mutex::new(Store::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn calls(&self, call: Call) -> usize {
        self.lock().calls.get(&call).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.values().sum()
    }

    pub fn fail_next(&self, call: Call, err: RemoteError) {
        self.script(call, Duration::ZERO, Err(err));
    }

    pub fn respond_next(&self, call: Call, body: Value, delay: Duration) {
        self.script(call, delay, Ok(body));
    }

    fn script(&self, call: Call, delay: Duration, result: Result<Value, RemoteError>) {
        self.lock()
            .scripts
            .entry(call)
            .or_default()
            .push_back(Scripted { delay, result });
    }

    pub fn is_seeded(&self) -> bool {
        self.lock().portfolio.is_some()
    }

    /// Count the call and hand back its scripted answer, if one is queued.
    async fn intercept(&self, call: Call) -> Option<Result<Value, RemoteError>> {
        let scripted = {
            let mut store = self.lock();
            *store.calls.entry(call).or_insert(0) += 1;
            store.scripts.get_mut(&call).and_then(VecDeque::pop_front)
        };
        let scripted = scripted?;
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        Some(scripted.result)
    }

    fn check_user(&self, user_id: &str, endpoint: String) -> Result<(), RemoteError> {
        if user_id == self.user_id {
            Ok(())
        } else {
            Err(not_found(endpoint, "Portfolio not found"))
        }
    }
}

fn not_found(endpoint: String, message: &str) -> RemoteError {
    RemoteError::Http {
        status: 404,
        endpoint,
        message: message.to_string(),
    }
}

fn item_id(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

#[async_trait]
impl PortfolioBackend for MemoryBackend {
    fn default_user(&self) -> &str {
        &self.user_id
    }

    async fn seed(&self) -> Result<Value, RemoteError> {
        if let Some(result) = self.intercept(Call::Seed).await {
            return result;
        }
        let mut store = self.lock();
        if store.portfolio.is_some() {
            return Ok(json!({"message": "Data already exists"}));
        }

        let data = default_dataset();
        let mut meta = Map::new();
        meta.insert("userId".to_string(), json!(self.user_id));
        meta.insert("stats".to_string(), json!(data.stats));
        meta.insert("personalInfo".to_string(), json!(data.personal_info));
        store.portfolio = Some(meta);

        let lists = [
            (Section::Experience, json!(data.experience)),
            (Section::Projects, json!(data.projects)),
            (Section::Skills, json!(data.skills)),
            (Section::Education, json!(data.education)),
            (Section::Certifications, json!(data.certifications)),
        ];
        for (section, list) in lists {
            let items: Vec<Value> = match list {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            // Bare certification names become `{name}` records like the backend stores them.
            let items = items
                .into_iter()
                .map(|item| match item {
                    Value::String(name) => json!({ "name": name }),
                    other => other,
                })
                .map(|item| store.assign_id(item))
                .collect();
            store.sections.insert(section, items);
        }
        Ok(json!({"message": "Database seeded successfully"}))
    }

    async fn portfolio(&self, user_id: &str) -> Result<Value, RemoteError> {
        if let Some(result) = self.intercept(Call::Portfolio).await {
            return result;
        }
        let endpoint = format!("/portfolio/{}", user_id);
        self.check_user(user_id, endpoint.clone())?;
        let mut store = self.lock();
        let meta = store
            .portfolio
            .clone()
            .ok_or_else(|| not_found(endpoint, "Portfolio not found"))?;

        let mut aggregate = Map::new();
        aggregate.insert("portfolio".to_string(), Value::Object(meta));
        for section in Section::ALL {
            aggregate.insert(section.as_str().to_string(), Value::Array(store.items(section).clone()));
        }
        Ok(Value::Object(aggregate))
    }

    async fn update_portfolio(&self, user_id: &str, payload: &Value) -> Result<Value, RemoteError> {
        if let Some(result) = self.intercept(Call::UpdatePortfolio).await {
            return result;
        }
        let endpoint = format!("/portfolio/{}", user_id);
        self.check_user(user_id, endpoint.clone())?;
        let mut store = self.lock();
        let meta = store
            .portfolio
            .as_mut()
            .ok_or_else(|| not_found(endpoint, "Portfolio not found"))?;
        if let Value::Object(fields) = payload {
            for (k, v) in fields {
                meta.insert(k.clone(), v.clone());
            }
        }
        Ok(Value::Object(meta.clone()))
    }

    async fn list(&self, user_id: &str, section: Section) -> Result<Value, RemoteError> {
        if let Some(result) = self.intercept(Call::List(section)).await {
            return result;
        }
        self.check_user(user_id, format!("/portfolio/{}/{}", user_id, section))?;
        Ok(Value::Array(self.lock().items(section).clone()))
    }

    async fn create(&self, user_id: &str, section: Section, payload: &Value) -> Result<Value, RemoteError> {
        if let Some(result) = self.intercept(Call::Create(section)).await {
            return result;
        }
        self.check_user(user_id, format!("/portfolio/{}/{}", user_id, section))?;
        let mut store = self.lock();
        let item = store.assign_id(payload.clone());
        store.items(section).push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        user_id: &str,
        section: Section,
        id: &str,
        payload: &Value,
    ) -> Result<Value, RemoteError> {
        ensure_supported(section, Operation::Update)?;
        if let Some(result) = self.intercept(Call::Update(section)).await {
            return result;
        }
        let endpoint = format!("/portfolio/{}/{}/{}", user_id, section, id);
        self.check_user(user_id, endpoint.clone())?;
        let mut store = self.lock();
        let item = store
            .items(section)
            .iter_mut()
            .find(|item| item_id(item) == Some(id))
            .ok_or_else(|| not_found(endpoint, "Item not found"))?;
        if let (Value::Object(fields), Value::Object(patch)) = (&mut *item, payload) {
            for (k, v) in patch {
                if k != "id" {
                    fields.insert(k.clone(), v.clone());
                }
            }
        }
        Ok(item.clone())
    }

    async fn delete(&self, user_id: &str, section: Section, id: &str) -> Result<Value, RemoteError> {
        ensure_supported(section, Operation::Delete)?;
        if let Some(result) = self.intercept(Call::Delete(section)).await {
            return result;
        }
        let endpoint = format!("/portfolio/{}/{}/{}", user_id, section, id);
        self.check_user(user_id, endpoint.clone())?;
        let mut store = self.lock();
        let items = store.items(section);
        let before = items.len();
        items.retain(|item| item_id(item) != Some(id));
        if items.len() == before {
            return Err(not_found(endpoint, "Item not found"));
        }
        Ok(json!({"message": "Item deleted successfully"}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortfolioViewModel;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let backend = MemoryBackend::new();
        backend.seed().await.unwrap();
        let first = backend.list("akshaj", Section::Projects).await.unwrap();
        backend.seed().await.unwrap();
        let second = backend.list("akshaj", Section::Projects).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(backend.calls(Call::Seed), 2);
    }

    #[tokio::test]
    async fn test_aggregate_matches_defaults_after_seed() {
        let backend = MemoryBackend::new();
        backend.seed().await.unwrap();
        let payload = backend.portfolio("akshaj").await.unwrap();
        let vm = PortfolioViewModel::from_payload(&payload);
        let defaults = default_dataset();
        assert_eq!(vm.stats, defaults.stats);
        assert_eq!(vm.projects.len(), defaults.projects.len());
        assert!(vm.projects.iter().all(|p| p.id.is_some()));
        assert_eq!(vm.certifications[0].name(), defaults.certifications[0].name());
    }

    #[tokio::test]
    async fn test_unseeded_portfolio_is_404() {
        let backend = MemoryBackend::new();
        let err = backend.portfolio("akshaj").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let backend = MemoryBackend::new();
        backend.seed().await.unwrap();
        let err = backend.list("someone-else", Section::Skills).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_update_and_delete_item() {
        let backend = MemoryBackend::new();
        let created = backend
            .create("akshaj", Section::Skills, &json!({"category": "Rust"}))
            .await
            .unwrap();
        let id = item_id(&created).unwrap().to_string();

        let updated = backend
            .update("akshaj", Section::Skills, &id, &json!({"icon": "code"}))
            .await
            .unwrap();
        assert_eq!(updated["category"], "Rust");
        assert_eq!(updated["icon"], "code");

        backend.delete("akshaj", Section::Skills, &id).await.unwrap();
        let err = backend.delete("akshaj", Section::Skills, &id).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_scripted_failure_is_consumed_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(
            Call::Seed,
            RemoteError::Network {
                endpoint: "/seed-data".into(),
                message: "connection refused".into(),
            },
        );
        assert!(backend.seed().await.is_err());
        assert!(backend.seed().await.is_ok());
        assert!(backend.is_seeded());
    }

    #[tokio::test]
    async fn test_append_only_sections_never_counted() {
        let backend = MemoryBackend::new();
        let err = backend
            .delete("akshaj", Section::Education, "1")
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Unsupported { .. }));
        assert_eq!(backend.total_calls(), 0);
    }
}
