/*!
 * Tests for recursive document translation
 */

use serde_json::{json, Value};
use lingojson::app_config::{Formality, TargetLanguage};
use lingojson::providers::mock::MockProvider;
use lingojson::translation::{count_translatable_leaves, is_translatable, DocumentTranslator, TranslationService};
use crate::common;

fn to_value(document: lingojson::Document) -> Value {
    Value::Object(document)
}

#[tokio::test]
async fn test_translate_withFlatString_shouldReplaceLeaf() {
    let service = TranslationService::new(MockProvider::working().with_translation("Hello", "Bonjour"), "EN");
    let input = common::document(r#"{"a": "Hello"}"#);

    let result = DocumentTranslator::new(&service).translate(&input, "FR").await;

    assert_eq!(to_value(result.document), json!({"a": "Bonjour"}));
    assert_eq!(result.stats.translated, 1);
    assert!(result.issues.is_empty());
}

#[tokio::test]
async fn test_translate_withNestedObject_shouldTranslateInside() {
    let service = TranslationService::new(MockProvider::working().with_translation("Hi", "Hallo"), "EN");
    let input = common::document(r#"{"a": {"b": "Hi"}}"#);

    let result = DocumentTranslator::new(&service).translate(&input, "DE").await;

    assert_eq!(to_value(result.document), json!({"a": {"b": "Hallo"}}));
}

#[tokio::test]
async fn test_translate_withNonStringAndEmptyValues_shouldPassThrough() {
    let provider = MockProvider::working();
    let service = TranslationService::new(provider.clone(), "EN");
    let input = common::document(r#"{"a": 5, "b": "", "c": false, "d": null, "e": 1.5, "f": "  "}"#);

    let result = DocumentTranslator::new(&service).translate(&input, "JA").await;

    assert_eq!(result.document, input);
    assert_eq!(provider.request_count(), 0);
    assert_eq!(result.stats.skipped, 2);
}

#[tokio::test]
async fn test_translate_withFailingLeaf_shouldKeepOriginalAndLogIssue() {
    let service = TranslationService::new(MockProvider::working().failing_on("Text"), "EN");
    let input = common::document(r#"{"a": "Text", "b": {"c": "Other"}}"#);

    let result = DocumentTranslator::new(&service).translate(&input, "FR").await;

    assert_eq!(to_value(result.document), json!({"a": "Text", "b": {"c": "[FR] Other"}}));
    assert_eq!(result.stats.fallbacks, 1);
    assert_eq!(result.stats.translated, 1);
    assert_eq!(result.issues.len(), 1);
    assert!(result.issues[0].message.contains("key 'a'"));
    assert!(result.issues[0].message.contains("Keeping original text"));
}

#[tokio::test]
async fn test_translate_withFailingNestedLeaf_shouldReportDottedPath() {
    let service = TranslationService::new(MockProvider::failing(), "EN");
    let input = common::document(r#"{"menu": {"recent": {"empty": "No recent files"}}}"#);

    let result = DocumentTranslator::new(&service).translate(&input, "DE").await;

    assert_eq!(result.document, input);
    assert!(result.issues[0].message.contains("key 'menu.recent.empty'"));
}

#[tokio::test]
async fn test_translate_withSampleLocale_shouldPreserveShapeAndOrder() {
    let service = TranslationService::new(MockProvider::working(), "EN");
    let input = common::document(common::SAMPLE_LOCALE);

    let result = DocumentTranslator::new(&service).translate(&input, "DE").await;

    let keys: Vec<&str> = result.document.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["title", "count", "enabled", "missing", "blank", "menu", "tags"]);
    assert_eq!(
        to_value(result.document),
        json!({
            "title": "[DE] Welcome",
            "count": 3,
            "enabled": true,
            "missing": null,
            "blank": "   ",
            "menu": {
                "open": "[DE] Open",
                "recent": {"empty": "[DE] No recent files", "max": 10}
            },
            "tags": ["a", "b"]
        })
    );
    assert_eq!(result.stats.translated, 3);
    assert_eq!(result.stats.characters, "Welcome".len() + "Open".len() + "No recent files".len());
}

#[tokio::test]
async fn test_translate_withDeepNesting_shouldReachEveryLevel() {
    let mut value = json!("Deep");
    for level in 0..12 {
        let mut map = lingojson::Document::new();
        map.insert(format!("level{}", level), value);
        value = Value::Object(map);
    }
    let input = match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    let service = TranslationService::new(MockProvider::working(), "EN");

    let result = DocumentTranslator::new(&service).translate(&input, "FR").await;

    let mut current = &to_value(result.document);
    for level in (0..12).rev() {
        current = &current[format!("level{}", level)];
    }
    assert_eq!(current, &json!("[FR] Deep"));
}

#[tokio::test]
async fn test_translate_twice_shouldBeDeterministic() {
    let service = TranslationService::new(MockProvider::working(), "EN");
    let input = common::document(common::SAMPLE_LOCALE);
    let translator = DocumentTranslator::new(&service);

    let first = translator.translate(&input, "AR").await;
    let second = translator.translate(&input, "AR").await;

    assert_eq!(first.document, second.document);
}

#[tokio::test]
async fn test_translate_shouldNotModifyInput() {
    let service = TranslationService::new(MockProvider::working(), "EN");
    let input = common::document(common::SAMPLE_LOCALE);
    let snapshot = input.clone();

    let _ = DocumentTranslator::new(&service).translate(&input, "DE").await;

    assert_eq!(input, snapshot);
}

#[tokio::test]
async fn test_translate_withProgress_shouldReportEverySubmittedLeaf() {
    let provider = MockProvider::working();
    let service = TranslationService::new(provider.clone(), "EN");
    let input = common::document(common::SAMPLE_LOCALE);
    let mut target = TargetLanguage::new("DE", "German");
    target.formality = Some(Formality::Less);
    let mut reports = Vec::new();

    let result = DocumentTranslator::new(&service)
        .translate_with_progress(&input, &target, |completed, total| reports.push((completed, total)))
        .await;

    assert_eq!(reports, vec![(1, 3), (2, 3), (3, 3)]);
    assert_eq!(result.stats.submitted(), 3);
    assert!(provider.requests().iter().all(|r| r.formality.as_deref() == Some("less")));
}

#[tokio::test]
async fn test_translate_withIntermittentProvider_shouldOnlyFallBackOnFailures() {
    let service = TranslationService::new(MockProvider::intermittent(2), "EN");
    let input = common::document(r#"{"a": "One", "b": "Two", "c": "Three", "d": "Four"}"#);

    let result = DocumentTranslator::new(&service).translate(&input, "DE").await;

    assert_eq!(
        to_value(result.document),
        json!({"a": "[DE] One", "b": "Two", "c": "[DE] Three", "d": "Four"})
    );
    assert_eq!(result.stats.fallbacks, 2);
}

#[test]
fn test_count_translatable_leaves_shouldIgnoreBlankAndNonStrings() {
    let input = common::document(common::SAMPLE_LOCALE);
    assert_eq!(count_translatable_leaves(&input), 3);

    assert!(is_translatable("x"));
    assert!(!is_translatable(""));
    assert!(!is_translatable(" \t\n"));
}
