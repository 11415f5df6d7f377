//! Integration tests for the full ingest flow.
//!
//! These tests exercise the collector end to end:
//! 1. Extract fields from a realistic posting
//! 2. Persist exactly once per source identity
//! 3. Report status over the collected records

use harvest::{
    format_digest, ChannelContext, ChannelMessage, Collector, IngestOutcome, MemoryStore,
    SkipReason, SourceIdentity,
};

fn collector() -> Collector<MemoryStore> {
    Collector::new(MemoryStore::new())
}

#[tokio::test]
async fn test_realistic_posting_end_to_end() {
    let collector = collector();
    let text = "Backend Engineer at Acme\n\
                Company: Acme Corp\n\
                Salary: $4000-5000\n\
                Location: Remote\n\
                Requirements: 3+ years Go\n\
                Contact: @acmehr";
    let message = ChannelMessage::new(text, SourceIdentity::channel(42, 7));

    let outcome = collector.ingest(&message).await.unwrap();

    let IngestOutcome::Created(posting) = outcome else {
        panic!("expected a created posting");
    };
    assert_eq!(posting.title, "Backend Engineer at Acme");
    assert_eq!(posting.company.as_deref(), Some("Acme Corp"));
    // `$` and `+` sit outside the normalization safe set
    assert_eq!(posting.salary.as_deref(), Some("4000-5000"));
    assert_eq!(posting.location.as_deref(), Some("Remote"));
    assert_eq!(posting.requirements.as_deref(), Some("3 years Go"));
    assert_eq!(posting.contact.as_deref(), Some("@acmehr"));
    assert_eq!(posting.description.as_deref(), Some(text));
    assert_eq!(posting.source, SourceIdentity::channel(42, 7));
    assert!(posting.is_active);

    // Redelivering the identical event creates nothing new
    let redelivered = collector.ingest(&message).await.unwrap();
    assert_eq!(
        redelivered.skip_reason(),
        Some(SkipReason::DuplicateIdentity)
    );
    assert_eq!(collector.count_active().await.unwrap(), 1);
}

#[tokio::test]
async fn test_idempotence_across_message_edits() {
    let collector = collector();
    let identity = SourceIdentity::channel(42, 7);

    let first = collector
        .ingest(&ChannelMessage::new("Rust Engineer", identity.clone()))
        .await
        .unwrap();
    assert!(first.is_created());

    // Same identity, edited text
    let second = collector
        .ingest(&ChannelMessage::new(
            "Rust Engineer (updated salary)",
            identity.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(second.skip_reason(), Some(SkipReason::DuplicateIdentity));

    let stored = collector.list_active().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Rust Engineer");
}

#[tokio::test]
async fn test_blank_messages_are_dropped() {
    let collector = collector();

    for (message_id, text) in [(1, ""), (2, "   "), (3, "\n\t\n")] {
        let outcome = collector
            .ingest(&ChannelMessage::new(text, SourceIdentity::message(message_id)))
            .await
            .unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyText));
    }

    assert_eq!(collector.count_active().await.unwrap(), 0);
}

#[tokio::test]
async fn test_decorated_noise_is_not_a_posting() {
    let collector = collector();

    let outcome = collector
        .ingest(&ChannelMessage::new(
            "💼\n💰 top pay here\n📍 anywhere",
            SourceIdentity::message(9),
        ))
        .await
        .unwrap();

    assert_eq!(outcome.skip_reason(), Some(SkipReason::NoExtractableTitle));
    assert_eq!(collector.count_active().await.unwrap(), 0);
}

#[tokio::test]
async fn test_digest_over_collected_postings() {
    let collector = collector();

    for message_id in 1..=3 {
        let message = ChannelMessage::new(
            format!("Engineer {message_id}\nCompany: Acme\nSalary: {message_id}000"),
            SourceIdentity::channel(42, message_id),
        )
        .with_channel(ChannelContext::new().with_username("acmejobs"));
        assert!(collector.ingest(&message).await.unwrap().is_created());
    }

    let digest = format_digest(&collector.list_active().await.unwrap());

    assert!(digest.contains("📊 Job postings collected: 3"));
    assert!(digest.contains("📌 Engineer 1"));
    assert!(digest.contains("💰 Salary: 1000"));
    assert!(digest.contains("🔗 Link: https://t.me/acmejobs/3"));
}

#[tokio::test]
async fn test_mixed_language_channel_traffic() {
    let collector = collector();

    let russian = ChannelMessage::new(
        "🔍 Ищем Go-разработчика\n💰 Зарплата: 300к\n📍 Город: Москва\n📱 Контакт: @hrbot",
        SourceIdentity::channel(77, 1),
    );
    let outcome = collector.ingest(&russian).await.unwrap();

    let IngestOutcome::Created(posting) = outcome else {
        panic!("expected a created posting");
    };
    // First line is decorated, so the title comes from the fallback path
    assert_eq!(posting.title, "Ищем Go-разработчика");
    assert_eq!(posting.salary.as_deref(), Some("300к"));
    assert_eq!(posting.location.as_deref(), Some("Москва"));
    assert_eq!(posting.contact.as_deref(), Some("@hrbot"));
}
