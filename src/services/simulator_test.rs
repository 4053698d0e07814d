use super::*;
use crate::services::responder::{EXAM_RESPONSE, FALLBACK_RESPONSE};
use crate::state::chat::Role;

fn session() -> ChatSession {
    ChatSession::new(&DeskConfig::default())
}

#[tokio::test(start_paused = true)]
async fn exam_question_end_to_end() {
    let mut chat = session();
    let topic = chat.submit("What is the exam schedule?").unwrap();
    assert_eq!(topic, Topic::Exam);

    let during = chat.snapshot();
    assert_eq!(during.messages.len(), 2);
    assert_eq!(during.messages[1].role, Role::User);
    assert_eq!(during.messages[1].content, "What is the exam schedule?");
    assert!(chat.is_typing());
    assert!(!chat.can_send("another"));

    chat.settle().await;

    let after = chat.snapshot();
    assert_eq!(after.messages.len(), 3);
    let last = after.last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, EXAM_RESPONSE);
    assert!(!after.is_typing);
    assert!(after.current_response.is_empty());
}

#[tokio::test(start_paused = true)]
async fn reveal_is_paced_by_typing_interval() {
    let mut chat = session();
    let start = Instant::now();
    chat.submit("anything at all").unwrap();
    chat.settle().await;

    let ticks = u32::try_from(FALLBACK_RESPONSE.chars().count() + 1).unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(20) * ticks);
}

#[tokio::test(start_paused = true)]
async fn buffer_grows_while_revealing() {
    let mut chat = session();
    chat.submit("deadline?").unwrap();

    let mut last_len = 0;
    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let len = chat.snapshot().current_response.len();
        assert!(len >= last_len);
        last_len = len;
    }
    assert!(last_len > 0);
    chat.settle().await;
}

#[tokio::test(start_paused = true)]
async fn blank_submission_is_rejected_without_reveal() {
    let mut chat = session();
    assert_eq!(chat.submit("   ").unwrap_err(), ChatError::EmptyInput);
    assert!(!chat.is_typing());
    assert_eq!(chat.snapshot().messages.len(), 1);
    assert!(chat.reveal.is_none());
}

#[tokio::test(start_paused = true)]
async fn submission_while_typing_is_rejected() {
    let mut chat = session();
    chat.submit("grade policy").unwrap();
    assert_eq!(chat.submit("exam?").unwrap_err(), ChatError::Busy);
    chat.settle().await;

    let snap = chat.snapshot();
    let assistant = snap.messages.iter().filter(|m| m.role == Role::Assistant).count();
    assert_eq!(assistant, 2);
    assert_eq!(snap.messages.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn sequential_submissions_each_commit_once() {
    let mut chat = session();
    chat.submit("deadline").unwrap();
    chat.settle().await;
    chat.submit("exam").unwrap();
    chat.settle().await;

    let snap = chat.snapshot();
    let roles: Vec<Role> = snap.messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant, Role::User, Role::Assistant]);
    assert!(snap.messages.windows(2).all(|w| w[0].seq < w[1].seq));
}

#[tokio::test(start_paused = true)]
async fn dispose_stops_reveal_before_commit() {
    let mut chat = session();
    chat.submit("exam").unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    chat.dispose();

    let frozen = chat.snapshot();
    tokio::time::sleep(Duration::from_secs(10)).await;
    let later = chat.snapshot();

    assert_eq!(later.messages.len(), 2);
    assert_eq!(later.current_response, frozen.current_response);
}

#[tokio::test(start_paused = true)]
async fn disposed_session_refuses_mutation() {
    let mut chat = session();
    let greeting = chat.snapshot().messages[0].id;
    chat.dispose();
    assert!(chat.is_disposed());

    assert_eq!(chat.submit("exam"), Err(ChatError::Disposed));
    assert_eq!(chat.toggle_flag(greeting), Err(ChatError::Disposed));
    tokio::time::sleep(Duration::from_secs(10)).await;

    let after = chat.snapshot();
    assert_eq!(after.messages.len(), 1);
    assert!(!after.messages[0].flagged);
    assert!(!after.is_typing);
    assert_eq!(ChatError::Disposed.notice().code.as_deref(), Some("E_DISPOSED"));
}

#[tokio::test(start_paused = true)]
async fn toggle_flag_on_committed_answer() {
    let mut chat = session();
    chat.submit("exam").unwrap();
    chat.settle().await;
    let id = chat.snapshot().last().unwrap().id;
    assert_eq!(chat.toggle_flag(id), Ok(true));
    assert!(chat.snapshot().last().unwrap().flagged);
}
