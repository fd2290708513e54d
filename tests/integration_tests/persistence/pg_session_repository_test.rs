use lexitutor::application::ports::SessionRepository;
use lexitutor::domain::{ConversationSession, Message, MessageRole, OwnerId, SessionId, SessionNaming};

use crate::test_postgres::TestPostgres;

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_new_session_when_creating_and_retrieving_then_session_is_persisted() {
    let test_pg = TestPostgres::new().await;
    let session = ConversationSession::new(
        OwnerId::new(),
        &SessionNaming::RolePlay("restaurant".to_string()),
    );

    test_pg
        .session_repository
        .create_session(&session)
        .await
        .expect("Failed to create session");

    let retrieved = test_pg
        .session_repository
        .get_session(session.id)
        .await
        .expect("Failed to retrieve session")
        .expect("Session not found");

    assert_eq!(retrieved.id, session.id);
    assert_eq!(retrieved.owner_id, session.owner_id);
    assert_eq!(retrieved.name, "Practice: restaurant");
    assert_eq!(retrieved.role_play.as_deref(), Some("restaurant"));
    assert!(retrieved.messages().is_empty());
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_session_when_appending_twice_then_messages_keep_append_order() {
    let test_pg = TestPostgres::new().await;
    let session = ConversationSession::new(OwnerId::new(), &SessionNaming::Default);
    test_pg
        .session_repository
        .create_session(&session)
        .await
        .expect("Failed to create session");

    let first = vec![
        Message::user("Hello").unwrap(),
        Message::assistant("Hi there!").unwrap(),
    ];
    let second = vec![
        Message::user("How are you?").unwrap(),
        Message::assistant("Great, thanks.").unwrap(),
    ];
    let first_update = test_pg
        .session_repository
        .append_messages(session.id, &first)
        .await
        .expect("Failed to append first turns");
    let second_update = test_pg
        .session_repository
        .append_messages(session.id, &second)
        .await
        .expect("Failed to append second turns");

    let retrieved = test_pg
        .session_repository
        .get_session(session.id)
        .await
        .unwrap()
        .unwrap();
    let contents: Vec<&str> = retrieved.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Hello", "Hi there!", "How are you?", "Great, thanks."]);
    assert_eq!(retrieved.messages()[1].role, MessageRole::Assistant);
    assert_eq!(retrieved.messages()[0].id, first[0].id);
    assert!(second_update >= first_update);
    assert_eq!(retrieved.updated_at, second_update);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_unknown_session_when_appending_then_not_found_and_nothing_written() {
    let test_pg = TestPostgres::new().await;

    let result = test_pg
        .session_repository
        .append_messages(SessionId::new(), &[Message::user("orphan").unwrap()])
        .await;

    assert!(result.is_err());
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_messages")
        .fetch_one(&test_pg.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_owner_sessions_when_listing_then_newest_first_with_counts() {
    let test_pg = TestPostgres::new().await;
    let owner = OwnerId::new();
    let older = ConversationSession::new(owner, &SessionNaming::Default);
    let newer = ConversationSession::new(owner, &SessionNaming::File("essay.docx".into()));
    let foreign = ConversationSession::new(OwnerId::new(), &SessionNaming::Default);
    for session in [&older, &newer, &foreign] {
        test_pg
            .session_repository
            .create_session(session)
            .await
            .unwrap();
    }
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    test_pg
        .session_repository
        .append_messages(newer.id, &[Message::user("latest").unwrap()])
        .await
        .unwrap();

    let page = test_pg
        .session_repository
        .list_sessions(owner, 0, 10)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].id, newer.id);
    assert_eq!(page.items[0].message_count, 1);
    assert_eq!(page.items[1].id, older.id);
    assert_eq!(page.items[1].message_count, 0);
}

#[tokio::test]
#[ignore = "requires a Docker daemon"]
async fn given_offset_beyond_bigint_range_when_listing_then_page_is_empty() {
    let test_pg = TestPostgres::new().await;
    let owner = OwnerId::new();
    test_pg
        .session_repository
        .create_session(&ConversationSession::new(owner, &SessionNaming::Default))
        .await
        .unwrap();

    let page = test_pg
        .session_repository
        .list_sessions(owner, usize::MAX, usize::MAX)
        .await
        .unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
}
