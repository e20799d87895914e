//! Storage Manager - Typed Records on Top of a File Store
//!
//! Wraps any `FileStore` (S3, local, in-memory) and adds what the
//! file primitives leave out: JSON encoding of records, the daily
//! metric append log, and error messages naming the record involved.
//!
//! This is the hexagonal architecture glue: the bot only knows about
//! records and ids, never about keys, buckets or files.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, warn};

use super::registry::Registry;
use crate::config::StorageManagerConfig;
use crate::domain::metric::day_partition;
use crate::domain::{BotStatus, DataFrame, Metric, MetricType, MetricValue};
use crate::error::{Action, StorageError, StorageResult};
use crate::ports::file_store::{FileStore, Record};

/// Type name used for metric log errors and keys.
const METRIC_TYPE_NAME: &str = "Metric";

/// Key of the metric log for one bot and one day (`yymmdd`).
pub fn metric_key(bot_id: &str, day: &str) -> String {
    format!("{METRIC_TYPE_NAME}/{bot_id}/{day}.jsonl")
}

/// Typed persistence facade over a file store.
#[derive(Clone)]
pub struct StorageManager {
    store: Arc<dyn FileStore>,
}

impl StorageManager {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Build the backend named by `config.class` with the built-in registry.
    pub async fn from_config(config: &StorageManagerConfig) -> StorageResult<Self> {
        Registry::default().build(config).await.map(Self::new)
    }

    /// The underlying file store, for raw key access.
    pub fn store(&self) -> &dyn FileStore {
        self.store.as_ref()
    }

    /// Serialize `data` and write it under `{T}/{data_id}.json`.
    #[instrument(skip(self, data), fields(type_name = T::TYPE_NAME))]
    pub async fn save<T: Record>(&self, data_id: &str, data: &T) -> StorageResult<()> {
        let key = self.store.file_path(data_id, T::TYPE_NAME);
        debug!(key = %key, "Saving {} {} to storage", T::TYPE_NAME, data_id);

        let json = serde_json::to_string(data)
            .map_err(|e| StorageError::from(e).during(Action::Saving, T::TYPE_NAME, data_id))?;

        self.store
            .save_file(&key, &json)
            .await
            .map_err(|e| e.during(Action::Saving, T::TYPE_NAME, data_id))
    }

    /// Read and deserialize the record stored for `data_id`.
    #[instrument(skip(self), fields(type_name = T::TYPE_NAME))]
    pub async fn load<T: Record>(&self, data_id: &str) -> StorageResult<T> {
        let key = self.store.file_path(data_id, T::TYPE_NAME);
        debug!(key = %key, "Loading {} {} from storage", T::TYPE_NAME, data_id);

        let json = self
            .store
            .load_file(&key)
            .await
            .map_err(|e| e.during(Action::Loading, T::TYPE_NAME, data_id))?;

        serde_json::from_str(&json)
            .map_err(|e| StorageError::from(e).during(Action::Loading, T::TYPE_NAME, data_id))
    }

    /// Remove the record stored for `data_id`. Missing records are not an error.
    #[instrument(skip(self), fields(type_name = T::TYPE_NAME))]
    pub async fn delete<T: Record>(&self, data_id: &str) -> StorageResult<()> {
        let key = self.store.file_path(data_id, T::TYPE_NAME);
        debug!(key = %key, "Deleting {} {} from storage", T::TYPE_NAME, data_id);

        self.store
            .delete_file(&key)
            .await
            .map_err(|e| e.during(Action::Deleting, T::TYPE_NAME, data_id))
    }

    pub async fn save_bot_status(&self, status: &BotStatus) -> StorageResult<()> {
        self.save(&status.bot_id, status).await
    }

    pub async fn load_bot_status(&self, bot_id: &str) -> StorageResult<BotStatus> {
        self.load(bot_id).await
    }

    pub async fn delete_bot_status(&self, bot_id: &str) -> StorageResult<()> {
        self.delete::<BotStatus>(bot_id).await
    }

    pub async fn save_data_frame(&self, df_id: &str, df: &DataFrame) -> StorageResult<()> {
        self.save(df_id, df).await
    }

    pub async fn load_data_frame(&self, df_id: &str) -> StorageResult<DataFrame> {
        self.load(df_id).await
    }

    pub async fn delete_data_frame(&self, df_id: &str) -> StorageResult<()> {
        self.delete::<DataFrame>(df_id).await
    }

    /// Append a metric to today's log for `bot_id`.
    pub async fn append_metric(
        &self,
        bot_id: &str,
        metric_name: &str,
        metric_type: MetricType,
        value: impl Into<MetricValue>,
        tags: &[String],
    ) -> StorageResult<()> {
        self.append_metric_at(bot_id, metric_name, metric_type, value, tags, Utc::now())
            .await
    }

    /// Append a metric stamped at `at` to that day's log.
    ///
    /// The whole log is read, extended by one line and written back;
    /// concurrent appends to the same log are last-writer-wins.
    #[instrument(skip(self, value, tags))]
    pub async fn append_metric_at(
        &self,
        bot_id: &str,
        metric_name: &str,
        metric_type: MetricType,
        value: impl Into<MetricValue>,
        tags: &[String],
        at: DateTime<Utc>,
    ) -> StorageResult<()> {
        let metric = Metric::new(bot_id, metric_name, metric_type, value, tags, at);
        let key = metric_key(bot_id, &day_partition(at));
        let wrap = |e: StorageError| e.during(Action::Appending, METRIC_TYPE_NAME, bot_id);

        let mut content = match self.store.load_file(&key).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => String::new(),
            Err(e) => return Err(wrap(e)),
        };
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }

        let line = serde_json::to_string(&metric).map_err(|e| wrap(e.into()))?;
        content.push_str(&line);
        content.push('\n');

        debug!(key = %key, "Appending {} to {} metric log", metric_name, bot_id);
        self.store.save_file(&key, &content).await.map_err(wrap)
    }

    /// Load one day's metric log. A missing log yields no metrics.
    pub async fn load_metrics(&self, bot_id: &str, day: &str) -> StorageResult<Vec<Metric>> {
        let key = metric_key(bot_id, day);

        let content = match self.store.load_file(&key).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Ok(Vec::new()),
            Err(e) => return Err(e.during(Action::Loading, METRIC_TYPE_NAME, bot_id)),
        };

        let mut metrics = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Metric>(line) {
                Ok(metric) => metrics.push(metric),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping malformed metric record");
                }
            }
        }

        Ok(metrics)
    }
}
