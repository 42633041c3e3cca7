/*!
 * Tests for the batch job queue
 */

use std::time::Duration;

use lingomem::errors::BatchError;
use lingomem::providers::mock::MockProvider;
use lingomem::translation::{BatchStatus, TranslationOptions};

use crate::common::{queue_with, wait_for_batch};

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_submit_shouldReturnPendingJobWithId() {
    let queue = queue_with(&MockProvider::working());

    let submission = queue
        .submit(texts(&["a", "b", "c"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    assert_eq!(submission.status, BatchStatus::Pending);
    assert!(submission.id.starts_with("batch_"));
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn test_getStatus_immediatelyAfterSubmit_shouldBePending() {
    let queue = queue_with(&MockProvider::working());
    let submission = queue
        .submit(texts(&["Hello"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    let report = queue.get_status(&submission.id);

    assert_eq!(report.status, BatchStatus::Pending);
    assert!(report.results.is_none());
    assert!(report.error.is_none());
}

#[tokio::test]
async fn test_getStatus_afterProcessing_shouldReturnOrderedResults() {
    let queue = queue_with(&MockProvider::working());
    let submission = queue
        .submit(texts(&["a", "b", "c"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    let report = wait_for_batch(&queue, &submission.id).await;

    assert_eq!(report.status, BatchStatus::Completed);
    let results = report.results.expect("completed batch should carry results");
    let translated: Vec<_> = results.iter().map(|r| r.translated_text.clone()).collect();
    assert_eq!(
        translated,
        vec![
            MockProvider::expected_translation("a", "es"),
            MockProvider::expected_translation("b", "es"),
            MockProvider::expected_translation("c", "es"),
        ]
    );
    assert!(results.iter().all(|r| r.detected_language.as_deref() == Some("en")));
    assert!(report.error.is_none());
}

#[tokio::test]
async fn test_getStatus_whileTranslating_shouldBeProcessing() {
    let queue = queue_with(&MockProvider::slow(300));
    let submission = queue
        .submit(texts(&["slow"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(queue.get_status(&submission.id).status, BatchStatus::Processing);

    let report = wait_for_batch(&queue, &submission.id).await;
    assert_eq!(report.status, BatchStatus::Completed);
}

#[tokio::test]
async fn test_failingItem_shouldFailWholeBatchWithoutResults() {
    let queue = queue_with(&MockProvider::failing_on("boom"));
    let submission = queue
        .submit(texts(&["fine", "boom", "also fine"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    let report = wait_for_batch(&queue, &submission.id).await;

    assert_eq!(report.status, BatchStatus::Failed);
    assert!(report.results.is_none());
    let error = report.error.expect("failed batch should carry an error");
    assert!(!error.is_empty());
    assert!(error.contains("boom"));
}

#[tokio::test]
async fn test_getStatus_withUnknownId_shouldReportNotFound() {
    let queue = queue_with(&MockProvider::working());

    let report = queue.get_status("batch_0_missing");

    assert_eq!(report.status, BatchStatus::Failed);
    assert_eq!(report.error.as_deref(), Some("Batch not found."));
    assert!(report.results.is_none());
    assert_eq!(
        queue.try_status("batch_0_missing"),
        Err(BatchError::NotFound("batch_0_missing".to_string()))
    );
}

#[tokio::test]
async fn test_submit_withNoTexts_shouldFail() {
    let queue = queue_with(&MockProvider::working());
    let result = queue.submit(Vec::new(), "es", None, TranslationOptions::default());
    assert_eq!(result, Err(BatchError::EmptyBatch));
    assert!(queue.is_empty());
}

#[test]
fn test_submit_outsideRuntime_shouldFail() {
    let queue = queue_with(&MockProvider::working());
    let result = queue.submit(texts(&["a"]), "es", None, TranslationOptions::default());
    assert_eq!(result, Err(BatchError::RuntimeUnavailable));
}

#[tokio::test]
async fn test_repeatedBatch_shouldBeServedFromMemory() {
    let provider = MockProvider::working();
    let queue = queue_with(&provider);

    let first = queue
        .submit(texts(&["one", "two"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();
    let report = wait_for_batch(&queue, &first.id).await;
    assert!(report.results.unwrap().iter().all(|r| !r.from_memory));

    let second = queue
        .submit(texts(&["one", "two"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();
    let report = wait_for_batch(&queue, &second.id).await;

    let results = report.results.unwrap();
    assert!(results.iter().all(|r| r.from_memory && r.confidence == 1.0));
    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_batchWithoutSourceLanguage_shouldDetectFromFirstItem() {
    let queue = queue_with(&MockProvider::working());
    let submission = queue
        .submit(texts(&["Привет мир", "Hello"]), "es", None, TranslationOptions::default())
        .unwrap();

    let report = wait_for_batch(&queue, &submission.id).await;

    let results = report.results.unwrap();
    assert!(results.iter().all(|r| r.detected_language.as_deref() == Some("ru")));
}

#[tokio::test]
async fn test_job_shouldExposeRequestAndCreationTime() {
    let queue = queue_with(&MockProvider::working());
    let submission = queue
        .submit(texts(&["a"]), "fr", Some("en"), TranslationOptions::default())
        .unwrap();

    let job = queue.job(&submission.id).unwrap();

    assert_eq!(job.request.items, vec!["a".to_string()]);
    assert_eq!(job.request.target_language, "fr");
    assert!(job.created_at <= chrono::Utc::now());
    assert_eq!(queue.job_ids(), vec![submission.id]);
}

#[tokio::test]
async fn test_submit_withManualClock_shouldStampCreationTime() {
    let (clock, shared) = crate::common::manual_clock();
    let queue = queue_with(&MockProvider::working()).with_clock(shared);
    clock.advance(chrono::Duration::minutes(5));

    let submission = queue
        .submit(texts(&["a"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    let job = queue.job(&submission.id).unwrap();
    assert_eq!(job.created_at, lingomem::clock::Clock::now(&clock));
    assert!(submission.id.starts_with(&format!("batch_{}_", job.created_at.timestamp_millis())));
}

#[tokio::test]
async fn test_pollUntilSettledWith_shouldReportEveryPoll() {
    let queue = queue_with(&MockProvider::slow(30));
    let submission = queue
        .submit(texts(&["one", "two"]), "es", Some("en"), TranslationOptions::default())
        .unwrap();

    let mut seen = Vec::new();
    let report = queue
        .poll_until_settled_with(&submission.id, Duration::from_millis(5), 400, |r| seen.push(r.status))
        .await;

    assert_eq!(report.status, BatchStatus::Completed);
    assert!(seen.len() > 1);
    assert_eq!(seen.first(), Some(&BatchStatus::Pending));
    assert_eq!(seen.last(), Some(&BatchStatus::Completed));
}

#[tokio::test]
async fn test_pollUntilSettledWith_unknownId_shouldReportOnce() {
    let queue = queue_with(&MockProvider::working());

    let mut polls = 0;
    let report = queue
        .poll_until_settled_with("batch_0_missing", Duration::from_millis(5), 10, |_| polls += 1)
        .await;

    assert_eq!(report.status, BatchStatus::Failed);
    assert_eq!(polls, 1);
}
