use lexitutor::domain::{ConversationSession, Message, OwnerId, SessionNaming};

#[test]
fn given_naming_context_when_creating_session_then_display_name_matches() {
    let owner = OwnerId::new();

    let default = ConversationSession::new(owner, &SessionNaming::Default);
    let practice = ConversationSession::new(owner, &SessionNaming::RolePlay("restaurant".into()));
    let file = ConversationSession::new(owner, &SessionNaming::File("essay.docx".into()));

    assert_eq!(default.name, "Chat session");
    assert_eq!(default.role_play, None);
    assert_eq!(practice.name, "Practice: restaurant");
    assert_eq!(practice.role_play.as_deref(), Some("restaurant"));
    assert_eq!(file.name, "File: essay.docx");
    assert_eq!(file.role_play, None);
}

#[test]
fn given_session_when_appending_then_order_is_preserved_and_updated_at_advances() {
    let mut session = ConversationSession::new(OwnerId::new(), &SessionNaming::Default);
    let created = session.updated_at;

    session.append(Message::user("first").unwrap());
    session.append(Message::assistant("second").unwrap());

    let contents: Vec<&str> = session.messages().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);
    assert!(session.updated_at >= created);
}

#[test]
fn given_other_owner_when_checking_ownership_then_not_owned() {
    let owner = OwnerId::new();
    let session = ConversationSession::new(owner, &SessionNaming::Default);

    assert!(session.is_owned_by(owner));
    assert!(!session.is_owned_by(OwnerId::new()));
}
