use super::*;

fn passed(id: &str) -> ComplianceCheck {
    ComplianceCheck {
        id: id.to_string(),
        name: id.to_string(),
        category: Category::Quality,
        message: "ok".to_string(),
        outcome: CheckOutcome::Passed,
    }
}

fn failed(id: &str, severity: Severity, suggestion: Option<&str>) -> ComplianceCheck {
    ComplianceCheck {
        id: id.to_string(),
        name: id.to_string(),
        category: Category::Legal,
        message: "not ok".to_string(),
        outcome: CheckOutcome::Failed {
            severity,
            suggestion: suggestion.map(String::from),
        },
    }
}

#[test]
fn all_passing_scores_100() {
    let weights = ScoringWeights::default();
    let score = weights.score([(Severity::Error, true), (Severity::Info, true)]);
    assert_eq!(score, 100);
}

#[test]
fn no_checks_scores_100() {
    assert_eq!(ScoringWeights::default().score([]), 100);
}

#[test]
fn error_failure_costs_more_than_warning_failure() {
    let weights = ScoringWeights::default();
    let error_failed = weights.score([(Severity::Error, false), (Severity::Warning, true)]);
    let warning_failed = weights.score([(Severity::Error, true), (Severity::Warning, false)]);
    assert_eq!(error_failed, 40);
    assert_eq!(warning_failed, 60);
}

#[test]
fn score_rounds_half_up() {
    // 1 of 8 weight passed = 12.5 -> 13
    let weights = ScoringWeights {
        error: 7,
        warning: 1,
        info: 1,
    };
    assert_eq!(weights.score([(Severity::Warning, true), (Severity::Error, false)]), 13);
}

#[test]
fn zero_weights_score_100() {
    let weights = ScoringWeights {
        error: 0,
        warning: 0,
        info: 0,
    };
    assert_eq!(weights.score([(Severity::Error, false)]), 100);
}

#[test]
fn passed_check_reports_info_severity_and_no_suggestion() {
    let check = passed("quality.canvas-bounds");
    assert_eq!(check.severity(), Severity::Info);
    assert!(check.suggestion().is_none());
    assert!(!check.is_blocking());
}

#[test]
fn only_error_failures_block() {
    let result = ComplianceResult::assemble(
        50,
        vec![
            failed("a", Severity::Warning, None),
            failed("b", Severity::Info, None),
        ],
    );
    assert!(result.passed());

    let blocked = ComplianceResult::assemble(50, vec![failed("c", Severity::Error, None)]);
    assert!(!blocked.passed());
}

#[test]
fn suggestions_are_deduplicated_in_check_order() {
    let result = ComplianceResult::assemble(
        10,
        vec![
            failed("a", Severity::Error, Some("Fix colors")),
            passed("b"),
            failed("c", Severity::Warning, Some("Add price")),
            failed("d", Severity::Info, Some("Fix colors")),
            failed("e", Severity::Info, None),
        ],
    );
    assert_eq!(result.suggestions(), ["Fix colors", "Add price"]);
    assert_eq!(result.failures_at(Severity::Info), 2);
    assert_eq!(result.failed_checks().count(), 4);
}

#[test]
fn check_serializes_flat() {
    let json = serde_json::to_value(failed("legal.price", Severity::Error, Some("Add a price")))
        .unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "legal.price",
            "name": "legal.price",
            "category": "legal",
            "passed": false,
            "message": "not ok",
            "severity": "error",
            "suggestion": "Add a price"
        })
    );

    let json = serde_json::to_value(passed("x")).unwrap();
    assert_eq!(json["severity"], "info");
    assert!(json.get("suggestion").is_none());
}

#[test]
fn result_serializes_all_fields() {
    let result = ComplianceResult::assemble(100, vec![passed("a")]);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["score"], 100);
    assert_eq!(json["passed"], true);
    assert_eq!(json["checks"].as_array().unwrap().len(), 1);
    assert_eq!(json["suggestions"], serde_json::json!([]));
}
