//! Advisor Integration Tests
//!
//! Routing scenarios and pipeline-wide properties.

use std::collections::BTreeMap;

use email_advising::services::guardrail::PersonalContentDetector;
use email_advising::services::knowledge::MatchStrategy;
use email_advising::{
    AdvisorSettings, ConfidenceSettings, Decision, EmailAdvisor, KnowledgeArticle, KnowledgeBase,
};

use crate::fixtures::{corpus, knowledge_base, strings};

const QUERIES: &[&str] = &[
    "I want to withdraw from my course",
    "How do I withdraw from a class?",
    "I'm feeling really depressed and can't afford tuition",
    "Where can I order an official transcript for Fall 2025?",
    "When is tuition due?",
    "Can I park on campus?",
    "please help me, I don't know what to do about my classes",
    "",
    "   ...!!!   ",
    "the a to of",
    "Comment puis-je réserver un rendez-vous?",
];

fn advisor() -> EmailAdvisor {
    EmailAdvisor::new(knowledge_base(), AdvisorSettings::default())
        .unwrap()
        .with_corpus(&corpus())
        .unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_withdraw_scenario() {
    let response = advisor().process("I want to withdraw from my course", &BTreeMap::new());

    assert_eq!(response.ranked_matches[0].article_id, "withdraw-course");
    assert!(response.confidence > 0.0);
    let expected = if response.confidence >= 0.75 {
        Decision::AutoSend
    } else {
        Decision::NeedsReview
    };
    assert_eq!(response.decision, expected);
    assert_eq!(response.article_id.as_deref(), Some("withdraw-course"));
    assert!(response.body.contains("Here is how to withdraw"));
    assert_eq!(response.references[0].document_id, "withdrawal-policy");
}

#[test]
fn test_sensitive_query_forced_to_review_at_full_confidence() {
    let query = "I'm feeling really depressed and can't afford tuition";
    let kb = KnowledgeBase::new(vec![KnowledgeArticle::new(
        "hardship",
        "Re: Financial hardship",
        strings(&[query]),
        "We are here to help.",
    )])
    .unwrap();
    let advisor = EmailAdvisor::new(kb, AdvisorSettings::default()).unwrap();

    let response = advisor.process(query, &BTreeMap::new());

    assert!((response.confidence - 1.0).abs() < 1e-9);
    assert_eq!(response.decision, Decision::NeedsReview);
    assert!(!response.auto_send);
    assert!(response
        .reasons
        .iter()
        .any(|r| r == "Sensitive keywords detected: depressed, can't afford"));
}

#[test]
fn test_empty_query_escalates() {
    let response = advisor().process("", &BTreeMap::new());

    assert!(response.ranked_matches.is_empty());
    assert!(response.references.is_empty());
    assert_eq!(response.decision, Decision::Escalate);
    assert_eq!(response.confidence, 0.0);
    assert!(!response.auto_send);
    assert!(response.article_id.is_none());
}

#[test]
fn test_unrelated_query_escalates_with_holding_reply() {
    let response = advisor().process("Is there parking near the stadium?", &BTreeMap::new());

    assert_eq!(response.decision, Decision::Escalate);
    assert!(response.article_id.is_none());
    assert_eq!(response.subject, "Re: Your advising question");
    assert!(response.body.starts_with("Hi there,"));
}

#[test]
fn test_escalation_carries_best_candidate_follow_ups() {
    let settings = AdvisorSettings {
        confidence: ConfidenceSettings::new(0.99, 0.98).unwrap(),
        ..AdvisorSettings::default()
    };
    let advisor = EmailAdvisor::new(knowledge_base(), settings).unwrap();

    let response = advisor.process("I want to withdraw from my course", &BTreeMap::new());

    assert_eq!(response.decision, Decision::Escalate);
    assert_eq!(
        response.follow_up_questions,
        vec!["Confirm the student's enrollment status."]
    );
}

#[test]
fn test_round_trip_exact_utterance() {
    let advisor = advisor();
    for article in knowledge_base().iter() {
        if article.utterances.len() != 1 {
            continue;
        }
        let response = advisor.process(&article.utterances[0], &BTreeMap::new());
        assert_eq!(response.ranked_matches[0].article_id, article.id);
        assert!((response.confidence - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_round_trip_best_utterance_strategy() {
    let settings = AdvisorSettings {
        match_strategy: MatchStrategy::BestUtterance,
        ..AdvisorSettings::default()
    };
    let advisor = EmailAdvisor::new(knowledge_base(), settings).unwrap();
    for article in knowledge_base().iter() {
        for utterance in &article.utterances {
            let response = advisor.process(utterance, &BTreeMap::new());
            assert_eq!(response.ranked_matches[0].article_id, article.id);
            assert!((response.confidence - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_metadata_rendering() {
    let mut metadata = BTreeMap::new();
    metadata.insert("student_name".to_string(), "Jordan".to_string());

    let response = advisor().process("How do I withdraw from a class?", &metadata);

    assert!(response
        .body
        .starts_with("Hi Jordan,\n\nHere is how to withdraw from a class before the end of week ten."));
}

#[test]
fn test_term_extracted_from_query() {
    let response = advisor().process("When is tuition due for Spring 2026?", &BTreeMap::new());

    assert_eq!(response.article_id.as_deref(), Some("tuition-payment"));
    assert!(response
        .body
        .starts_with("Tuition is due on the first day of the Spring 2026."));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_confidence_always_bounded() {
    let advisor = advisor();
    for query in QUERIES {
        let response = advisor.process(query, &BTreeMap::new());
        assert!((0.0..=1.0).contains(&response.confidence), "query: {query}");
    }
}

#[test]
fn test_auto_send_iff_confident_and_not_personal() {
    let detector = PersonalContentDetector::default();
    for thresholds in [(0.75, 0.40), (0.3, 0.1), (0.0, 0.0), (1.0, 1.0)] {
        let settings = AdvisorSettings {
            confidence: ConfidenceSettings::new(thresholds.0, thresholds.1).unwrap(),
            ..AdvisorSettings::default()
        };
        let advisor = EmailAdvisor::new(knowledge_base(), settings).unwrap();
        for query in QUERIES {
            let response = advisor.process(query, &BTreeMap::new());
            let personal = detector.check(query).is_personal;
            assert_eq!(
                response.auto_send,
                response.confidence >= thresholds.0 && !personal,
                "query: {query}, thresholds: {thresholds:?}"
            );
            assert_eq!(response.auto_send, response.decision == Decision::AutoSend);
            if personal {
                assert!(!response.auto_send);
            }
        }
    }
}

#[test]
fn test_ranked_matches_sorted_descending() {
    let advisor = advisor();
    for query in QUERIES {
        let response = advisor.process(query, &BTreeMap::new());
        for pair in response.ranked_matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence, "query: {query}");
        }
    }
}

#[test]
fn test_tied_matches_keep_knowledge_base_order() {
    let response = advisor().process("zebra", &BTreeMap::new());
    let ids: Vec<&str> = response
        .ranked_matches
        .iter()
        .map(|m| m.article_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec!["withdraw-course", "transcript-request", "tuition-payment", "advising-appointment"]
    );
}

#[test]
fn test_references_respect_limit_and_are_positive() {
    for limit in [0, 1, 2, 3, 10] {
        let settings = AdvisorSettings {
            reference_limit: limit,
            ..AdvisorSettings::default()
        };
        let advisor = EmailAdvisor::new(knowledge_base(), settings)
            .unwrap()
            .with_corpus(&corpus())
            .unwrap();
        for query in QUERIES {
            let response = advisor.process(query, &BTreeMap::new());
            assert!(response.references.len() <= limit, "query: {query}, limit: {limit}");
            assert!(response.references.iter().all(|r| r.score > 0.0));
        }
    }
}

#[test]
fn test_process_is_idempotent() {
    let first = advisor();
    let mut metadata = BTreeMap::new();
    metadata.insert("student_name".to_string(), "Sam".to_string());
    for query in QUERIES {
        let once = first.process(query, &metadata);
        let twice = first.process(query, &metadata);
        assert_eq!(once, twice, "query: {query}");
    }

    let rebuilt = advisor();
    for query in QUERIES {
        assert_eq!(first.process(query, &metadata), rebuilt.process(query, &metadata));
    }
}

#[test]
fn test_advisor_is_shareable_across_threads() {
    let advisor = std::sync::Arc::new(advisor());
    let expected = advisor.process("When is tuition due?", &BTreeMap::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let advisor = advisor.clone();
            std::thread::spawn(move || advisor.process("When is tuition due?", &BTreeMap::new()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
