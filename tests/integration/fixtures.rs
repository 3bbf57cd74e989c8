//! Shared fixtures

use email_advising::{KnowledgeArticle, KnowledgeBase, ReferenceCorpus, ReferenceDocument};

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn knowledge_base() -> KnowledgeBase {
    KnowledgeBase::new(vec![
        KnowledgeArticle::new(
            "withdraw-course",
            "Re: Withdrawing from a class",
            strings(&["How do I withdraw from a class?"]),
            "Hi {student_name|there},\n\nHere is how to withdraw from a class before {withdrawal_deadline}.",
        )
        .with_categories(strings(&["registration"]))
        .with_follow_up_questions(strings(&["Confirm the student's enrollment status."]))
        .with_metadata("withdrawal_deadline", "the end of week ten"),
        KnowledgeArticle::new(
            "transcript-request",
            "Re: Official transcripts",
            strings(&[
                "How can I get an official transcript?",
                "Where do I order transcripts?",
            ]),
            "You can order official transcripts through the registrar portal.",
        )
        .with_categories(strings(&["records"])),
        KnowledgeArticle::new(
            "tuition-payment",
            "Re: Paying tuition",
            strings(&["When is tuition due?", "How do I set up a tuition payment plan?"]),
            "Tuition is due on the first day of the {term|term}.",
        )
        .with_categories(strings(&["financial-aid"]))
        .with_follow_up_questions(strings(&["Refer to the bursar if a hold exists."])),
        KnowledgeArticle::new(
            "advising-appointment",
            "Re: Booking an advising appointment",
            strings(&["How do I book an advising appointment?"]),
            "Appointments can be booked through the advising portal.",
        ),
    ])
    .unwrap()
}

pub fn corpus() -> ReferenceCorpus {
    ReferenceCorpus::new(vec![
        ReferenceDocument::new(
            "withdrawal-policy",
            "Course Withdrawal Policy",
            "Students may withdraw from a class through the end of week ten. A W grade appears on the transcript.",
        )
        .with_url("https://registrar.example.edu/withdrawal")
        .with_tags(strings(&["registration", "withdrawal"])),
        ReferenceDocument::new(
            "transcript-faq",
            "Transcript FAQ",
            "Official transcripts are ordered online. Processing takes three business days.",
        )
        .with_tags(strings(&["records"])),
        ReferenceDocument::new(
            "tuition-schedule",
            "Tuition Payment Schedule",
            "Tuition is due on the first day of the term. Payment plans are available.",
        )
        .with_tags(strings(&["financial-aid"])),
        ReferenceDocument::new(
            "parking",
            "Parking Permits",
            "Parking permits are sold at the start of each semester.",
        ),
    ])
}
