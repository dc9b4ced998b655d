//! Tests for decision rule generation

#[path = "common/mod.rs"]
mod common;

use common::{names, table};
use polars::prelude::*;
use roughlearn::pipeline::{
    generate_rules, generate_rules_binned, majority_rules, RuleSet, Value, DEFAULT_MAX_RULES,
};

#[test]
fn test_dominant_rule_first() {
    let t = common::create_dominant_rule_table();

    let rules = generate_rules(&t, &names(&["a", "b"]), 3);

    assert!(!rules.is_fallback(), "Grouping should succeed");
    let list = rules.rules();
    assert_eq!(list.len(), 3);
    assert_eq!(
        list[0].to_string(),
        "IF a = High AND b = Low THEN Good Performance (Support: 7, Confidence: 70.0%)"
    );
    assert_eq!(
        list[1].to_string(),
        "IF a = Low AND b = High THEN Poor Performance (Support: 2, Confidence: 20.0%)"
    );
    assert_eq!(list[2].support, 1);
}

#[test]
fn test_rules_limited_to_max() {
    let t = common::create_dominant_rule_table();

    let rules = generate_rules(&t, &names(&["a", "b"]), 1);

    assert_eq!(rules.rules().len(), 1);
    assert_eq!(rules.rules()[0].support, 7);
}

#[test]
fn test_rules_sorted_by_support() {
    for seed in 0..10 {
        let t = common::create_random_table(120, 3, 10, seed);
        let attrs = t.condition_attributes().to_vec();

        let rules = generate_rules(&t, &attrs, DEFAULT_MAX_RULES);
        let supports: Vec<usize> = rules.rules().iter().map(|r| r.support).collect();

        assert!(!supports.is_empty());
        assert!(
            supports.windows(2).all(|w| w[0] >= w[1]),
            "seed {}: supports not descending: {:?}",
            seed,
            supports
        );
    }
}

#[test]
fn test_confidence_matches_support() {
    let t = common::create_random_table(80, 2, 5, 3);
    let attrs = t.condition_attributes().to_vec();

    let rules = generate_rules(&t, &attrs, DEFAULT_MAX_RULES);

    for rule in rules.rules() {
        let expected = rule.support as f64 / 80.0 * 100.0;
        assert!((rule.confidence - expected).abs() < 1e-9);
        assert!(rule.support >= 1, "Zero-support rules must not appear");
        assert_eq!(rule.conditions.len(), attrs.len());
    }
}

#[test]
fn test_rules_cover_table_when_unlimited() {
    let t = common::create_random_table(50, 2, 4, 11);
    let attrs = t.condition_attributes().to_vec();

    let rules = generate_rules(&t, &attrs, usize::MAX);
    let covered: usize = rules.rules().iter().map(|r| r.support).sum();

    assert_eq!(covered, 50, "Every row belongs to exactly one group");
}

#[test]
fn test_rules_record_discretization() {
    let t = common::create_dominant_rule_table();

    match generate_rules_binned(&t, &names(&["a"]), 2, DEFAULT_MAX_RULES) {
        RuleSet::Primary { discretization, .. } => {
            assert_eq!(discretization.len(), 1);
            assert_eq!(discretization[0].0, "a");
        }
        other => panic!("Expected primary rules, got {:?}", other),
    }
}

#[test]
fn test_two_bins_use_low_and_medium() {
    let t = common::create_dominant_rule_table();

    let rules = generate_rules_binned(&t, &names(&["a"]), 2, DEFAULT_MAX_RULES);

    assert_eq!(
        rules.rules()[0].conditions[0].value,
        Value::Label("Medium".to_string())
    );
}

#[test]
fn test_fallback_on_unknown_attribute() {
    let t = common::create_dominant_rule_table();

    let rules = generate_rules(&t, &names(&["a", "nonexistent"]), DEFAULT_MAX_RULES);

    assert!(rules.is_fallback());
    let reason = rules.fallback_reason().unwrap();
    assert!(
        reason.contains("nonexistent"),
        "Reason should name the column: {}",
        reason
    );

    // Fallback rules use raw values of the readable attribute only
    let list = rules.rules();
    assert_eq!(list.len(), 2);
    assert_eq!(
        list[0].to_string(),
        "IF a = 1.0 THEN Good Performance (Support: 7, Confidence: 70.0%)"
    );
    assert_eq!(list[1].conditions[0].value, Value::Number(0.0));
    assert_eq!(list[1].decision, 0);
    assert_eq!(list[1].support, 3);
}

#[test]
fn test_fallback_on_unsupported_type() {
    let t = table(
        df! {
            "a" => [1i32, 1, 0, 0],
            "enrolled" => [
                chrono::NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2021, 9, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2021, 9, 1).unwrap(),
            ],
            "d" => [1i32, 1, 0, 1],
        }
        .unwrap(),
        &["a", "enrolled"],
    );

    let rules = generate_rules(&t, &names(&["a", "enrolled"]), DEFAULT_MAX_RULES);

    assert!(rules.is_fallback());
    assert!(rules
        .rules()
        .iter()
        .all(|r| r.conditions[0].attribute == "a"));
}

#[test]
fn test_majority_rules_three_attributes() {
    let t = table(
        df! {
            "p" => [1i32, 1, 2, 2, 3],
            "q" => [0i32, 0, 0, 1, 1],
            "r" => [5i32, 5, 5, 5, 6],
            "s" => [9i32, 9, 9, 9, 9],
            "d" => [1i32, 1, 0, 0, 1],
        }
        .unwrap(),
        &["p", "q", "r", "s"],
    );

    let rules = majority_rules(&t, &names(&["p", "q", "r", "s"]), DEFAULT_MAX_RULES);

    assert_eq!(rules.len(), 6, "Two values for each of the first three attributes");
    assert!(rules.iter().all(|r| r.conditions[0].attribute != "s"));

    // p=1 and p=2 tie with p=3 losing; first appearance wins
    assert_eq!(rules[0].conditions[0].value, Value::Number(1.0));
    assert_eq!(rules[1].conditions[0].value, Value::Number(2.0));
    assert_eq!(rules[1].decision, 0);

    // q=0 appears three times: decisions 1,1,0
    assert_eq!(rules[2].conditions[0].value, Value::Number(0.0));
    assert_eq!((rules[2].decision, rules[2].support), (1, 2));

    // q=1: one poor and one good student, first appearance breaks the tie
    assert_eq!((rules[3].decision, rules[3].support), (0, 1));
}

#[test]
fn test_majority_rules_respects_max() {
    let t = common::create_dominant_rule_table();

    let rules = majority_rules(&t, &names(&["a", "b"]), 3);

    assert_eq!(rules.len(), 3);
}
