/*!
 * Batch translation queue.
 *
 * Callers submit a list of texts and get a job id back immediately. The job
 * is processed in the background on the Tokio runtime: every text goes
 * through the single-text translation service (memory first), and the job
 * ends up either `completed` with one result per text or `failed` with the
 * first error. Callers poll for the status. Only the most recent jobs are
 * kept once processing finishes.
 */

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::app_config::BatchConfig;
use crate::clock::{SharedClock, system_clock};
use crate::errors::{BatchError, TranslationError};
use super::core::{TranslationOptions, TranslationRequest, TranslationResponse, TranslationService};

/// Lifecycle of a batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Queued, processing not started yet
    Pending,
    /// Items are being translated
    Processing,
    /// Every item translated
    Completed,
    /// Some item failed; no partial results are kept
    Failed,
}

impl BatchStatus {
    /// Whether the job will not change anymore
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What a batch job was asked to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Texts to translate, in order
    pub items: Vec<String>,
    /// Source language; detected per item when absent
    pub source_language: Option<String>,
    /// Target language
    pub target_language: String,
    /// Options shared by every item
    pub options: TranslationOptions,
}

/// Aggregate result of a completed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Translated texts, in input order
    pub translations: Vec<String>,
    /// Detected language of the first item
    pub detected_language: Option<String>,
    /// Mean confidence over all items
    pub confidence: f64,
    /// Whether every item came from the translation memory
    pub from_memory: bool,
}

impl BatchOutcome {
    fn aggregate(responses: Vec<TranslationResponse>) -> Self {
        let count = responses.len().max(1) as f64;
        let confidence = responses.iter().map(|r| r.confidence).sum::<f64>() / count;
        let from_memory = !responses.is_empty() && responses.iter().all(|r| r.from_memory);
        let detected_language = responses.first().and_then(|r| r.detected_language.clone());
        Self {
            translations: responses.into_iter().map(|r| r.translated_text).collect(),
            detected_language,
            confidence,
            from_memory,
        }
    }

    /// Per-item responses sharing the aggregate language, confidence and memory flag
    pub fn responses(&self) -> Vec<TranslationResponse> {
        self.translations
            .iter()
            .map(|text| TranslationResponse {
                translated_text: text.clone(),
                detected_language: self.detected_language.clone(),
                confidence: self.confidence,
                from_memory: self.from_memory,
            })
            .collect()
    }
}

/// A queued batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    /// Unique id
    pub id: String,
    /// Submitted work
    pub request: BatchRequest,
    /// Current status
    pub status: BatchStatus,
    /// Present only when completed
    pub result: Option<BatchOutcome>,
    /// Present only when failed
    pub error: Option<String>,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Submission order, breaks ties between equal timestamps
    pub sequence: u64,
}

/// Answer to a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSubmission {
    pub id: String,
    pub status: BatchStatus,
}

/// Answer to a status poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStatusReport {
    pub id: String,
    pub status: BatchStatus,
    /// One response per item, only when completed
    pub results: Option<Vec<TranslationResponse>>,
    pub error: Option<String>,
}

impl BatchStatusReport {
    fn from_job(job: &BatchJob) -> Self {
        Self {
            id: job.id.clone(),
            status: job.status,
            results: match (&job.status, &job.result) {
                (BatchStatus::Completed, Some(outcome)) => Some(outcome.responses()),
                _ => None,
            },
            error: job.error.clone(),
        }
    }

    fn not_found(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: BatchStatus::Failed,
            results: None,
            error: Some(BatchError::NotFound(id.to_string()).to_string()),
        }
    }
}

/// Generate an id from the submission time and a random suffix
fn generate_batch_id(created_at: DateTime<Utc>) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!("batch_{}_{}", created_at.timestamp_millis(), suffix)
}

/// Queue of batch translation jobs
///
/// Clones share the same jobs.
#[derive(Debug, Clone)]
pub struct BatchQueue {
    service: TranslationService,
    jobs: Arc<Mutex<Vec<BatchJob>>>,
    sequence: Arc<AtomicU64>,
    max_jobs: usize,
    max_concurrent_items: usize,
    schedule_delay: Duration,
    clock: SharedClock,
}

impl BatchQueue {
    /// Create a queue translating through `service`
    pub fn new(service: TranslationService, config: &BatchConfig) -> Self {
        Self {
            service,
            jobs: Arc::new(Mutex::new(Vec::new())),
            sequence: Arc::new(AtomicU64::new(0)),
            max_jobs: config.max_jobs.max(1),
            max_concurrent_items: config.max_concurrent_items.max(1),
            schedule_delay: config.schedule_delay(),
            clock: system_clock(),
        }
    }

    /// Read submission times from `clock`
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// The translation service used for items
    pub fn service(&self) -> &TranslationService {
        &self.service
    }

    /// Queue a batch and schedule its processing
    ///
    /// Returns immediately with the `pending` job; processing starts after
    /// the schedule delay on the current Tokio runtime.
    pub fn submit(
        &self,
        texts: Vec<String>,
        target_language: &str,
        source_language: Option<&str>,
        options: TranslationOptions,
    ) -> Result<BatchSubmission, BatchError> {
        if texts.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| BatchError::RuntimeUnavailable)?;

        let created_at = self.clock.now();
        let job = BatchJob {
            id: generate_batch_id(created_at),
            request: BatchRequest {
                items: texts,
                source_language: source_language.map(str::to_string),
                target_language: target_language.to_string(),
                options,
            },
            status: BatchStatus::Pending,
            result: None,
            error: None,
            created_at,
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
        };
        let submission = BatchSubmission {
            id: job.id.clone(),
            status: job.status,
        };

        debug!("Queued batch {} with {} items", job.id, job.request.items.len());
        self.jobs.lock().push(job);

        let queue = self.clone();
        let id = submission.id.clone();
        runtime.spawn(async move {
            tokio::time::sleep(queue.schedule_delay).await;
            queue.process(&id).await;
        });

        Ok(submission)
    }

    /// Translate every item of a job and record the outcome
    async fn process(&self, id: &str) {
        let request = {
            let mut jobs = self.jobs.lock();
            match jobs.iter_mut().find(|job| job.id == id) {
                Some(job) => {
                    job.status = BatchStatus::Processing;
                    job.request.clone()
                }
                None => {
                    warn!("Batch {} vanished before processing", id);
                    return;
                }
            }
        };

        debug!("Processing batch {} ({} items)", id, request.items.len());
        let result = self.translate_items(&request).await;

        {
            let mut jobs = self.jobs.lock();
            match jobs.iter_mut().find(|job| job.id == id) {
                Some(job) => match result {
                    Ok(responses) => {
                        job.result = Some(BatchOutcome::aggregate(responses));
                        job.status = BatchStatus::Completed;
                        info!("Batch {} completed ({} items)", id, request.items.len());
                    }
                    Err(e) => {
                        let message = BatchError::ProcessingFailed(e.to_string()).to_string();
                        error!("Batch {} failed: {}", id, e);
                        job.error = Some(message);
                        job.status = BatchStatus::Failed;
                    }
                },
                None => warn!("Batch {} was pruned while processing", id),
            }
            self.prune(&mut jobs);
        }
    }

    /// Fan out over the items, keeping input order; any failure fails all
    async fn translate_items(&self, request: &BatchRequest) -> Result<Vec<TranslationResponse>, TranslationError> {
        // Owned items keep the spawned processing future `Send`
        let results: Vec<Result<TranslationResponse, TranslationError>> = stream::iter(request.items.clone())
            .map(|text| {
                let service = self.service.clone();
                let item = TranslationRequest {
                    text,
                    source_language: request.source_language.clone(),
                    target_language: request.target_language.clone(),
                    options: request.options.clone(),
                };
                async move { service.translate(&item).await }
            })
            .buffered(self.max_concurrent_items)
            .collect()
            .await;

        results.into_iter().collect()
    }

    /// Keep only the most recent jobs
    fn prune(&self, jobs: &mut Vec<BatchJob>) {
        if jobs.len() <= self.max_jobs {
            return;
        }
        jobs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        let dropped = jobs.len() - self.max_jobs;
        jobs.truncate(self.max_jobs);
        debug!("Pruned {} old batch jobs", dropped);
    }

    /// Current status of a job, or `BatchError::NotFound`
    pub fn try_status(&self, id: &str) -> Result<BatchStatusReport, BatchError> {
        self.jobs
            .lock()
            .iter()
            .find(|job| job.id == id)
            .map(BatchStatusReport::from_job)
            .ok_or_else(|| BatchError::NotFound(id.to_string()))
    }

    /// Current status of a job; unknown ids report `failed` with "Batch not found."
    pub fn get_status(&self, id: &str) -> BatchStatusReport {
        self.try_status(id)
            .unwrap_or_else(|_| BatchStatusReport::not_found(id))
    }

    /// Poll with a fixed backoff until the job settles or attempts run out
    ///
    /// Returns the last report seen, which may still be unsettled.
    pub async fn poll_until_settled(&self, id: &str, interval: Duration, max_attempts: usize) -> BatchStatusReport {
        self.poll_until_settled_with(id, interval, max_attempts, |_| {}).await
    }

    /// Same as `poll_until_settled`, calling `on_poll` with every report fetched
    pub async fn poll_until_settled_with<F>(
        &self,
        id: &str,
        interval: Duration,
        max_attempts: usize,
        mut on_poll: F,
    ) -> BatchStatusReport
    where
        F: FnMut(&BatchStatusReport),
    {
        let mut report = self.get_status(id);
        on_poll(&report);
        let mut attempts = 1;
        while !report.status.is_settled() && attempts < max_attempts {
            tokio::time::sleep(interval).await;
            report = self.get_status(id);
            on_poll(&report);
            attempts += 1;
        }
        report
    }

    /// Snapshot of a job
    pub fn job(&self, id: &str) -> Option<BatchJob> {
        self.jobs.lock().iter().find(|job| job.id == id).cloned()
    }

    /// Ids of the jobs currently held
    pub fn job_ids(&self) -> Vec<String> {
        self.jobs.lock().iter().map(|job| job.id.clone()).collect()
    }

    /// Number of jobs currently held
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    /// Whether the queue holds no job
    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }
}
