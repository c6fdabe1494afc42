//! Main-page data loader.
//!
//! Seeds the backend once, fetches the aggregate payload and reshapes it. Any
//! failure is logged and answered with the bundled dataset, so a settled load
//! always has something to render.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use serde_json::{json, Value};

use crate::api::PortfolioBackend;
use crate::defaults::default_dataset;
use crate::error::RemoteError;
use crate::logging::{log, log_fallback, obj, v_num, v_str, Domain, Level};
use crate::model::PortfolioViewModel;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(Arc<PortfolioViewModel>),
    /// The fetch failed and the bundled dataset is being served instead.
    Fallback(Arc<PortfolioViewModel>),
}

impl LoadState {
    pub fn data(&self) -> Option<Arc<PortfolioViewModel>> {
        match self {
            LoadState::Loading => None,
            LoadState::Ready(data) | LoadState::Fallback(data) => Some(Arc::clone(data)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// What the page reads: loading flag, data, and an error slot that the main
/// page load never fills.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSnapshot {
    pub loading: bool,
    pub data: Option<Arc<PortfolioViewModel>>,
    pub error: Option<String>,
}

struct Slot {
    state: LoadState,
    generation: u64,
}

pub struct PortfolioLoader<B> {
    backend: B,
    initialized: AtomicBool,
    issued: AtomicU64,
    slot: Mutex<Slot>,
}

impl<B: PortfolioBackend> PortfolioLoader<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            initialized: AtomicBool::new(false),
            issued: AtomicU64::new(0),
            slot: Mutex::new(Slot {
                state: LoadState::Loading,
                generation: 0,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> LoadState {
        self.lock().state.clone()
    }

    pub fn snapshot(&self) -> LoaderSnapshot {
        let state = self.state();
        LoaderSnapshot {
            loading: state.is_loading(),
            data: state.data(),
            error: None,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run one load and return the view model it produced.
    ///
    /// When loads overlap, the one started last owns the state slot; an older
    /// load that settles later still returns its own data but leaves the slot alone.
    pub async fn load(&self) -> Arc<PortfolioViewModel> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().state = LoadState::Loading;
        let started = Instant::now();

        self.ensure_seeded().await;

        let user = self.backend.default_user().to_string();
        let fetched = self.backend.portfolio(&user).await.and_then(|payload| match payload {
            Value::Object(_) => Ok(payload),
            _ => Err(RemoteError::Decode {
                endpoint: format!("/portfolio/{}", user),
                message: "expected an object".to_string(),
            }),
        });
        let outcome = match fetched {
            Ok(payload) => LoadState::Ready(Arc::new(PortfolioViewModel::from_payload(&payload))),
            Err(err) => {
                log_fallback(&err.to_string());
                LoadState::Fallback(Arc::new(default_dataset()))
            }
        };
        let data = outcome.data().unwrap_or_else(|| Arc::new(default_dataset()));

        self.settle(ticket, outcome, started);
        data
    }

    /// Start over, seed call included.
    pub async fn refresh(&self) -> Arc<PortfolioViewModel> {
        self.initialized.store(false, Ordering::SeqCst);
        self.load().await
    }

    async fn ensure_seeded(&self) {
        if self.is_initialized() {
            return;
        }
        match self.backend.seed().await {
            Ok(_) => self.initialized.store(true, Ordering::SeqCst),
            Err(err) => log(
                Level::Warn,
                Domain::Loader,
                "loader.seed_failed",
                obj(&[("msg", v_str("continuing without seed")), ("error", v_str(&err.to_string()))]),
            ),
        }
    }

    fn settle(&self, ticket: u64, outcome: LoadState, started: Instant) {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let kind = match &outcome {
            LoadState::Ready(_) => "ready",
            LoadState::Fallback(_) => "fallback",
            LoadState::Loading => "loading",
        };

        let mut slot = self.lock();
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket < latest || ticket < slot.generation {
            log(
                Level::Debug,
                Domain::Loader,
                "loader.stale",
                obj(&[("ticket", json!(ticket)), ("latest", json!(latest))]),
            );
            return;
        }
        slot.state = outcome;
        slot.generation = ticket;
        drop(slot);

        log(
            Level::Info,
            Domain::Loader,
            "loader.settled",
            obj(&[
                ("state", v_str(kind)),
                ("ticket", json!(ticket)),
                ("elapsed_ms", v_num(elapsed_ms)),
            ]),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Call, MemoryBackend};
    use std::time::Duration;

    fn network_error(endpoint: &str) -> RemoteError {
        RemoteError::Network {
            endpoint: endpoint.to_string(),
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let loader = PortfolioLoader::new(MemoryBackend::new());
        assert_eq!(loader.state(), LoadState::Loading);
        let snap = loader.snapshot();
        assert!(snap.loading);
        assert!(snap.data.is_none());
    }

    #[tokio::test]
    async fn test_load_seeds_then_fetches() {
        let loader = PortfolioLoader::new(MemoryBackend::new());
        let data = loader.load().await;
        assert!(matches!(loader.state(), LoadState::Ready(_)));
        assert!(loader.is_initialized());
        assert_eq!(data.stats, default_dataset().stats);
        assert_eq!(loader.backend().calls(Call::Seed), 1);
        assert_eq!(loader.backend().calls(Call::Portfolio), 1);
    }

    #[tokio::test]
    async fn test_second_load_skips_seed() {
        let loader = PortfolioLoader::new(MemoryBackend::new());
        loader.load().await;
        loader.load().await;
        assert_eq!(loader.backend().calls(Call::Seed), 1);
        assert_eq!(loader.backend().calls(Call::Portfolio), 2);
    }

    #[tokio::test]
    async fn test_refresh_reruns_seed_and_fetch_once_each() {
        let loader = PortfolioLoader::new(MemoryBackend::new());
        loader.load().await;
        loader.refresh().await;
        assert_eq!(loader.backend().calls(Call::Seed), 2);
        assert_eq!(loader.backend().calls(Call::Portfolio), 2);
    }

    #[tokio::test]
    async fn test_seed_failure_does_not_block_fetch() {
        let backend = MemoryBackend::new();
        backend.fail_next(Call::Seed, network_error("/seed-data"));
        backend.respond_next(Call::Portfolio, json!({"projects": [{"title": "P"}]}), Duration::ZERO);
        let loader = PortfolioLoader::new(backend);

        let data = loader.load().await;
        assert_eq!(loader.backend().calls(Call::Portfolio), 1);
        assert_eq!(data.projects.len(), 1);
        assert!(!loader.is_initialized());

        // Seed is retried on the next load because it never succeeded.
        loader.load().await;
        assert_eq!(loader.backend().calls(Call::Seed), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_without_error() {
        let backend = MemoryBackend::new();
        backend.fail_next(Call::Portfolio, network_error("/portfolio/akshaj"));
        let loader = PortfolioLoader::new(backend);

        let data = loader.load().await;
        assert_eq!(*data, default_dataset());
        assert_eq!(data.stats[0].value, "3+");
        assert_eq!(data.stats[0].label, "Years Experience");
        assert!(matches!(loader.state(), LoadState::Fallback(_)));

        let snap = loader.snapshot();
        assert!(!snap.loading);
        assert_eq!(snap.error, None);
        assert_eq!(snap.data.as_deref(), Some(&default_dataset()));
    }

    #[tokio::test]
    async fn test_http_and_decode_failures_fall_back() {
        let backend = MemoryBackend::new();
        backend.fail_next(
            Call::Portfolio,
            RemoteError::Http {
                status: 500,
                endpoint: "/portfolio/akshaj".into(),
                message: "Internal Server Error".into(),
            },
        );
        backend.fail_next(
            Call::Portfolio,
            RemoteError::Decode {
                endpoint: "/portfolio/akshaj".into(),
                message: "expected value".into(),
            },
        );
        let loader = PortfolioLoader::new(backend);
        assert_eq!(*loader.load().await, default_dataset());
        assert_eq!(*loader.load().await, default_dataset());
        assert_eq!(loader.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_non_object_payload_falls_back() {
        let backend = MemoryBackend::new();
        backend.respond_next(Call::Portfolio, Value::Null, Duration::ZERO);
        backend.respond_next(Call::Portfolio, json!([1, 2]), Duration::ZERO);
        let loader = PortfolioLoader::new(backend);

        assert_eq!(*loader.load().await, default_dataset());
        assert!(matches!(loader.state(), LoadState::Fallback(_)));
        assert_eq!(*loader.load().await, default_dataset());
        assert!(matches!(loader.state(), LoadState::Fallback(_)));
        assert_eq!(loader.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_partial_payload_defaults_missing_sections() {
        let backend = MemoryBackend::new();
        backend.respond_next(
            Call::Portfolio,
            json!({"experience": [{"role": "a"}, {"role": "b"}, {"role": "c"}]}),
            Duration::ZERO,
        );
        let loader = PortfolioLoader::new(backend);
        let data = loader.load().await;
        assert_eq!(data.experience.len(), 3);
        assert_eq!(data.projects.len(), 0);
        assert!(data.stats.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_started_load_wins() {
        let backend = MemoryBackend::new();
        backend.respond_next(
            Call::Portfolio,
            json!({"projects": [{"title": "slow"}]}),
            Duration::from_millis(200),
        );
        backend.respond_next(
            Call::Portfolio,
            json!({"projects": [{"title": "fast"}]}),
            Duration::from_millis(10),
        );
        let loader = PortfolioLoader::new(backend);

        let (slow, fast) = tokio::join!(loader.load(), loader.refresh());
        assert_eq!(slow.projects[0].title, "slow");
        assert_eq!(fast.projects[0].title, "fast");

        let state = loader.state().data().unwrap();
        assert_eq!(state.projects[0].title, "fast");
    }
}
