use crate::cached::CachedSchema;
use crate::error::{Result, StoreError};
use crate::source::IntrospectionSource;
use hub_client::INTROSPECTION_QUERY;
use hub_graph::RelationshipGraphBuilder;
use hub_schema::parse_introspection;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Age after which the next read reloads the schema
    pub ttl: Duration,
    /// Capacity of the per-schema suggestion memo
    pub max_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
            max_size: DEFAULT_CACHE_MAX_SIZE,
        }
    }
}

/// Lazily loaded, TTL-bound schema slot with at most one load in flight
pub struct SchemaStore {
    source: Arc<dyn IntrospectionSource>,
    config: StoreConfig,
    query: String,
    builder: RelationshipGraphBuilder,
    slot: RwLock<Option<Arc<CachedSchema>>>,
    /// Held for the duration of a load; keeps the outcome of the last failed attempt
    load_gate: Mutex<Option<StoreError>>,
    /// Settled load attempts, bumped under `load_gate`
    attempts: AtomicU64,
    generation: AtomicU64,
}

impl SchemaStore {
    pub fn new(source: Arc<dyn IntrospectionSource>, config: StoreConfig) -> Self {
        Self {
            source,
            config,
            query: INTROSPECTION_QUERY.to_string(),
            builder: RelationshipGraphBuilder::default(),
            slot: RwLock::new(None),
            load_gate: Mutex::new(None),
            attempts: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_introspection_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_graph_builder(mut self, builder: RelationshipGraphBuilder) -> Self {
        self.builder = builder;
        self
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The loaded schema, loading it first when missing or expired.
    ///
    /// Callers that queued behind an in-flight load receive its outcome, error included. A call
    /// made after that load settled starts a new attempt.
    pub async fn get_schema(&self) -> Result<Arc<CachedSchema>> {
        if let Some(schema) = self.fresh().await {
            return Ok(schema);
        }

        let seen = self.attempts.load(Ordering::SeqCst);
        let mut last_error = self.load_gate.lock().await;
        // another caller may have loaded while we waited
        if let Some(schema) = self.fresh().await {
            return Ok(schema);
        }
        if let Some(error) = self.settled_since(seen, &last_error) {
            return Err(error);
        }

        self.attempt(&mut last_error).await
    }

    /// Reload unconditionally.
    ///
    /// Callers that started waiting on the same generation share one load, successful or not.
    pub async fn refresh(&self) -> Result<Arc<CachedSchema>> {
        let seen_generation = self.current_generation().await;
        let seen = self.attempts.load(Ordering::SeqCst);

        let mut last_error = self.load_gate.lock().await;
        if let Some(schema) = self.current().await {
            if schema.generation() > seen_generation {
                log::debug!("Schema already refreshed to generation {}", schema.generation());
                return Ok(schema);
            }
        }
        if let Some(error) = self.settled_since(seen, &last_error) {
            return Err(error);
        }

        self.attempt(&mut last_error).await
    }

    /// Drop the loaded schema; the next read reloads it
    pub async fn invalidate(&self) {
        if self.slot.write().await.take().is_some() {
            log::info!("Schema cache invalidated");
        }
    }

    /// The loaded schema without triggering a load, even if expired
    pub async fn current(&self) -> Option<Arc<CachedSchema>> {
        self.slot.read().await.clone()
    }

    async fn fresh(&self) -> Option<Arc<CachedSchema>> {
        self.current()
            .await
            .filter(|schema| !schema.is_expired(self.config.ttl))
    }

    async fn current_generation(&self) -> u64 {
        self.current().await.map_or(0, |schema| schema.generation())
    }

    /// The failure of an attempt that settled after `seen` was read
    fn settled_since(&self, seen: u64, last_error: &Option<StoreError>) -> Option<StoreError> {
        if self.attempts.load(Ordering::SeqCst) == seen {
            return None;
        }
        last_error.clone().map(|error| {
            log::debug!("Sharing failed schema load with a waiting caller");
            error
        })
    }

    /// Callers must hold `load_gate` and pass its contents
    async fn attempt(&self, last_error: &mut Option<StoreError>) -> Result<Arc<CachedSchema>> {
        let outcome = self.load_and_swap().await;
        *last_error = outcome.as_ref().err().cloned();
        self.attempts.fetch_add(1, Ordering::SeqCst);
        outcome
    }

    async fn load_and_swap(&self) -> Result<Arc<CachedSchema>> {
        let started = Instant::now();
        log::info!("Loading GraphQL schema via introspection");

        let data = self.source.introspect(&self.query).await.map_err(|e| {
            log::error!("Schema introspection failed: {e}");
            e
        })?;
        let snapshot = parse_introspection(&data)?;
        let graph = self.builder.build(&snapshot);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let schema = Arc::new(CachedSchema::new(
            snapshot,
            graph,
            generation,
            self.config.max_size,
        ));

        *self.slot.write().await = Some(Arc::clone(&schema));

        log::info!(
            "Schema loaded in {:?}: {} types, {} entities with relationships (generation {generation})",
            started.elapsed(),
            schema.snapshot().len(),
            schema.graph().entity_count(),
        );

        Ok(schema)
    }
}

impl std::fmt::Debug for SchemaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaStore")
            .field("config", &self.config)
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
