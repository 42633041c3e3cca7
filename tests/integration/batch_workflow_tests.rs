/*!
 * End-to-end batch submission and polling
 */

use std::sync::Arc;

use lingomem::app_config::BatchConfig;
use lingomem::errors::BatchError;
use lingomem::providers::mock::MockProvider;
use lingomem::translation::{BatchQueue, BatchStatus, Domain, TranslationOptions, TranslationService};

use crate::common::{instant_config, numbered_texts, queue_with, queue_with_limit, wait_for_batch};

#[tokio::test]
async fn test_sequentialBatches_overLimit_shouldKeepMostRecentTwenty() {
    let queue = queue_with_limit(&MockProvider::working(), 20);
    let mut ids = Vec::new();

    for i in 0..25 {
        let submission = queue
            .submit(numbered_texts(&format!("batch {}", i), 2), "es", Some("en"), TranslationOptions::default())
            .unwrap();
        let report = wait_for_batch(&queue, &submission.id).await;
        assert_eq!(report.status, BatchStatus::Completed);
        ids.push(submission.id);
    }

    assert_eq!(queue.len(), 20);
    for id in &ids[..5] {
        assert_eq!(queue.try_status(id), Err(BatchError::NotFound(id.clone())));
        assert_eq!(queue.get_status(id).error.as_deref(), Some("Batch not found."));
    }
    for id in &ids[5..] {
        assert_eq!(queue.get_status(id).status, BatchStatus::Completed);
    }
}

#[tokio::test]
async fn test_concurrentBatches_shouldAllComplete() {
    let queue = queue_with(&MockProvider::working());
    let ids: Vec<String> = (0..5)
        .map(|i| {
            queue
                .submit(numbered_texts(&format!("job {}", i), 10), "fr", Some("en"), TranslationOptions::default())
                .unwrap()
                .id
        })
        .collect();

    for (i, id) in ids.iter().enumerate() {
        let report = wait_for_batch(&queue, id).await;
        assert_eq!(report.status, BatchStatus::Completed);
        let results = report.results.unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(
            results[9].translated_text,
            MockProvider::expected_translation(&format!("job {}-9", i), "fr")
        );
    }
}

#[tokio::test]
async fn test_batchAndSingleTranslation_shouldShareMemory() {
    let provider = MockProvider::working();
    let config = instant_config();
    let service = TranslationService::with_provider(Arc::new(provider.clone()), &config);
    let queue = BatchQueue::new(service.clone(), &config.batch);

    service.translate_text("shared text", Some("en"), "de").await.unwrap();

    let submission = queue
        .submit(vec!["shared text".to_string()], "de", Some("en"), TranslationOptions::default())
        .unwrap();
    let report = wait_for_batch(&queue, &submission.id).await;

    assert!(report.results.unwrap()[0].from_memory);
    assert_eq!(provider.request_count(), 1);
    assert_eq!(service.history().len(), 2);
}

#[tokio::test]
async fn test_batchWithDomain_shouldApplyGlossary() {
    let queue = queue_with(&MockProvider::working());
    let options = TranslationOptions {
        domain: Some(Domain::Technical),
        ..TranslationOptions::default()
    };

    let submission = queue
        .submit(vec!["the database crashed".to_string()], "es", Some("en"), options)
        .unwrap();
    let report = wait_for_batch(&queue, &submission.id).await;

    let text = &report.results.unwrap()[0].translated_text;
    assert!(text.contains("base de datos"), "unexpected translation: {}", text);
}

#[tokio::test]
async fn test_pollUntilSettled_withFewAttempts_shouldReturnUnsettledReport() {
    let config = instant_config();
    let batch = BatchConfig {
        schedule_delay_ms: 200,
        ..config.batch.clone()
    };
    let service = TranslationService::with_provider(Arc::new(MockProvider::working()), &config);
    let queue = BatchQueue::new(service, &batch);

    let submission = queue
        .submit(vec!["later".to_string()], "es", Some("en"), TranslationOptions::default())
        .unwrap();
    let report = queue
        .poll_until_settled(&submission.id, std::time::Duration::from_millis(1), 2)
        .await;

    assert_eq!(report.status, BatchStatus::Pending);
}
