/*!
 * Tests for the per-string translation service
 */

use lingojson::errors::{AppError, ProviderError, TranslationError};
use lingojson::providers::mock::MockProvider;
use lingojson::translation::{TranslationOutcome, TranslationService, TranslationStats};

#[tokio::test]
async fn test_translate_text_withWorkingProvider_shouldReturnTranslation() {
    let provider = MockProvider::working().with_translation("Hello", "Hallo");
    let service = TranslationService::new(provider, "EN").with_tag_handling(Some("xml"));

    let outcome = service.translate_text("Hello", "DE", Some("more")).await;

    assert!(matches!(&outcome, TranslationOutcome::Translated(text) if text == "Hallo"));

    let requests = service.provider().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].source_language, "EN");
    assert_eq!(requests[0].target_language, "DE");
    assert_eq!(requests[0].tag_handling.as_deref(), Some("xml"));
    assert_eq!(requests[0].formality.as_deref(), Some("more"));
}

#[tokio::test]
async fn test_translate_text_withFailingProvider_shouldFallBackToOriginal() {
    let service = TranslationService::new(MockProvider::failing(), "EN");

    let outcome = service.translate_text("Save", "FR", None).await;

    assert!(outcome.is_fallback());
    match outcome {
        TranslationOutcome::Fallback { original, reason } => {
            assert_eq!(original, "Save");
            assert!(matches!(reason, TranslationError::Provider(ProviderError::ApiError { status_code: 500, .. })));
        }
        TranslationOutcome::Translated(_) => panic!("expected a fallback"),
    }
}

#[tokio::test]
async fn test_translate_text_withEmptyResponse_shouldFallBack() {
    let service = TranslationService::new(MockProvider::empty(), "EN");

    let outcome = service.translate_text("Close", "JA", None).await;

    assert!(matches!(&outcome, TranslationOutcome::Fallback { reason: TranslationError::EmptyResponse, .. }));
    assert_eq!(outcome.into_text(), "Close");
}

#[tokio::test]
async fn test_check_usage_withRemainingQuota_shouldReturnUsage() {
    let service = TranslationService::new(MockProvider::working().with_usage(1_000, 500_000), "EN");

    let usage = service.check_usage().await.unwrap();

    assert_eq!(usage.remaining(), 499_000);
}

#[tokio::test]
async fn test_check_usage_withExhaustedQuota_shouldFail() {
    let service = TranslationService::new(MockProvider::quota_exhausted(), "EN");

    let result = service.check_usage().await;

    assert!(matches!(result, Err(AppError::UsageLimitReached { used: 500_000, limit: 500_000 })));
}

#[tokio::test]
async fn test_check_usage_withRejectedKey_shouldReturnProviderError() {
    let service = TranslationService::new(MockProvider::unauthorized(), "EN");

    let result = service.check_usage().await;

    assert!(matches!(result, Err(AppError::Provider(ProviderError::AuthenticationError(_)))));
    assert_eq!(service.provider().request_count(), 0);
}

#[test]
fn test_translate_text_withBlockingRuntime_shouldWork() {
    let service = TranslationService::new(MockProvider::working(), "EN");

    let outcome = tokio_test::block_on(service.translate_text("Open", "DE", None));

    assert_eq!(outcome.into_text(), "[DE] Open");
}

#[test]
fn test_stats_summary_shouldReportProviderWaitTime() {
    let mut stats = TranslationStats::new();
    stats.translated = 2;
    stats.characters = 11;
    stats.api_duration = std::time::Duration::from_millis(1_500);

    let summary = stats.summary();

    assert!(summary.starts_with("2 translated, 0 kept after errors, 0 blank skipped, 11 characters sent in"));
    assert!(summary.ends_with("(1.50s waiting on the provider)"));
}
