//! Composer Integration Tests
//!
//! Generator-assisted composition through the full advisor, including the
//! guaranteed fallback to the template reply.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use email_advising::services::composer::{GeneratorComposer, TemplateComposer};
use email_advising::{AdvisorSettings, EmailAdvisor};
use email_advising_llm::{FnGenerator, GeneratorError, GeneratorResult};

use crate::fixtures::{corpus, knowledge_base};

const QUERIES: &[&str] = &[
    "I want to withdraw from my course",
    "How can I get an official transcript?",
    "I'm feeling really depressed and can't afford tuition",
    "Is there parking near the stadium?",
    "",
];

fn template_advisor() -> EmailAdvisor {
    EmailAdvisor::new(knowledge_base(), AdvisorSettings::default())
        .unwrap()
        .with_corpus(&corpus())
        .unwrap()
}

fn generator_advisor<F>(func: F) -> EmailAdvisor
where
    F: Fn(&str) -> GeneratorResult<String> + Send + Sync + 'static,
{
    let composer = GeneratorComposer::new(Arc::new(FnGenerator::new("test", func)));
    template_advisor().with_composer(Arc::new(composer))
}

#[test]
fn test_failing_generator_matches_template_output_exactly() {
    let template = template_advisor();
    let failing = generator_advisor(|_| {
        Err(GeneratorError::ServerError {
            message: "upstream unavailable".to_string(),
            status: Some(503),
        })
    });

    for query in QUERIES {
        let expected = template.process(query, &BTreeMap::new());
        let actual = failing.process(query, &BTreeMap::new());
        assert_eq!(actual, expected, "query: {query}");
    }
}

#[test]
fn test_panicking_generator_matches_template_output() {
    let template = template_advisor();
    let panicking = generator_advisor(|_| panic!("generator crashed"));

    let expected = template.process("I want to withdraw from my course", &BTreeMap::new());
    let actual = panicking.process("I want to withdraw from my course", &BTreeMap::new());
    assert_eq!(actual, expected);
}

#[test]
fn test_generator_called_once_per_query() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let advisor = generator_advisor(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(GeneratorError::NetworkError {
            message: "timed out".to_string(),
        })
    });

    advisor.process("I want to withdraw from my course", &BTreeMap::new());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_generated_reply_keeps_decision_and_references() {
    let template = template_advisor().process("I want to withdraw from my course", &BTreeMap::new());
    let advisor = generator_advisor(|prompt| {
        assert!(prompt.contains("Student question:\nI want to withdraw from my course"));
        Ok(r#"{"subject": "Withdrawing from your course", "body": "Dear student, please see [1]."}"#.to_string())
    });

    let response = advisor.process("I want to withdraw from my course", &BTreeMap::new());

    assert_eq!(response.subject, "Withdrawing from your course");
    assert!(response.body.starts_with("Dear student, please see [1].\n\nReferences:\n[1] Course Withdrawal Policy"));
    assert_eq!(response.decision, template.decision);
    assert_eq!(response.confidence, template.confidence);
    assert_eq!(response.references, template.references);
}

#[test]
fn test_unparsable_generation_uses_base_template() {
    let advisor = generator_advisor(|_| Ok("I could not produce JSON, sorry.".to_string()));
    let response = advisor.process("How can I get an official transcript?", &BTreeMap::new());

    assert_eq!(response.subject, "Re: Official transcripts");
    let block = TemplateComposer::new().format_references(&response.references);
    assert_eq!(
        response.body,
        format!(
            "You can order official transcripts through the registrar portal.\n\n{}",
            block
        )
    );
}

#[test]
fn test_json_array_generation_uses_base_template() {
    let template = template_advisor().process("How can I get an official transcript?", &BTreeMap::new());
    let advisor = generator_advisor(|_| Ok(r#"[{"subject": "Hijacked", "body": "Nope"}]"#.to_string()));
    let response = advisor.process("How can I get an official transcript?", &BTreeMap::new());

    assert_eq!(response.subject, "Re: Official transcripts");
    assert_eq!(response, template);
}
