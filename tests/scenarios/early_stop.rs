//! Test: the batch stops at the first error marker

use crate::helpers::*;
use issue_harness::BatchEvent;

/// Marker on the first case: row 1 never runs
#[tokio::test]
async fn test_error_on_first_case() {
    let invoker = MockInvoker::new(vec!["::error:: boom".to_string(), "ok".to_string()]);
    let result = run_batch_with_invoker(&two_bug_table(), default_config(), invoker.clone())
        .await
        .unwrap();

    assert_batch_halted_at(&result, 0);
    assert_eq!(invoker.calls(), 1);
    assert_eq!(invoker.titles(), vec!["Bug A"]);
    assert!(!result.console_text().contains("TEST ISSUE 1"));
}

/// Marker on row k: exactly k+1 invocations
#[tokio::test]
async fn test_error_on_kth_case() {
    let mut responses: Vec<String> = (0..3).map(|_| "ok".to_string()).collect();
    responses.push("Processing...\n::error::Invalid keyword: \n".to_string());
    responses.extend((0..4).map(|_| "ok".to_string()));

    let invoker = MockInvoker::new(responses);
    let result = run_batch_with_invoker(&numbered_table(8), default_config(), invoker.clone())
        .await
        .unwrap();

    assert_batch_halted_at(&result, 3);
    assert_eq!(result.outcome.invocations(), 4);
    assert_eq!(invoker.calls(), 4);
    assert_eq!(result.started(), vec![0, 1, 2, 3]);
}

/// The failing case's output is printed before the failure notice
#[tokio::test]
async fn test_failing_output_is_printed() {
    let invoker = MockInvoker::always("::error::Failed to load config file");
    let result = run_batch_with_invoker(&two_bug_table(), default_config(), invoker)
        .await
        .unwrap();

    let text = result.console_text();
    let output = text.find("::error::Failed to load config file").unwrap();
    let notice = text.find("Runtime ERROR found").unwrap();
    assert!(output < notice);
}

/// No pass separator and no further events after the failure
#[tokio::test]
async fn test_nothing_after_failure() {
    let invoker = MockInvoker::always("::error:: boom");
    let result = run_batch_with_invoker(&two_bug_table(), default_config(), invoker)
        .await
        .unwrap();

    let failed_at = result
        .events
        .iter()
        .position(|e| matches!(e, BatchEvent::CaseFailed { index: 0 }))
        .unwrap();
    assert!(matches!(
        &result.events[failed_at + 1..],
        [BatchEvent::BatchFinished { .. }]
    ));
    assert!(!result
        .events
        .iter()
        .any(|e| matches!(e, BatchEvent::CasePassed { .. })));
}

/// A case that cannot be launched aborts the batch with an error
#[tokio::test]
async fn test_launch_failure_aborts() {
    // Only one response for two cases
    let invoker = MockInvoker::new(vec!["ok".to_string()]);
    let err = run_batch_with_invoker(&two_bug_table(), default_config(), invoker.clone())
        .await
        .unwrap_err();

    assert!(err.contains("Case 1"));
    assert_eq!(invoker.calls(), 2);
}
