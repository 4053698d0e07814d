use super::*;

fn drain(state: &mut ChatState) -> Vec<String> {
    let mut buffers = Vec::new();
    loop {
        match state.advance_reveal() {
            RevealProgress::Revealing { .. } => buffers.push(state.current_response.clone()),
            RevealProgress::Committed | RevealProgress::Idle => return buffers,
        }
    }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn new_session_opens_with_greeting() {
    let state = ChatState::new();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role, Role::Assistant);
    assert_eq!(state.messages[0].content, GREETING);
    assert!(!state.is_typing);
    assert!(state.current_response.is_empty());
}

#[test]
fn empty_session_has_no_messages() {
    assert!(ChatState::empty().messages.is_empty());
}

// =============================================================
// send
// =============================================================

#[test]
fn send_rejects_blank_input_without_mutation() {
    let mut state = ChatState::new();
    for input in ["", "   ", "\n\t"] {
        assert_eq!(state.send(input).unwrap_err(), ChatError::EmptyInput);
    }
    assert_eq!(state.messages.len(), 1);
    assert!(!state.is_typing);
}

#[test]
fn send_rejects_while_typing() {
    let mut state = ChatState::new();
    state.send("first").unwrap();
    state.begin_reveal("answer");
    assert_eq!(state.send("second").unwrap_err(), ChatError::Busy);
    assert_eq!(state.messages.len(), 2);
}

#[test]
fn send_appends_user_message_with_increasing_seq() {
    let mut state = ChatState::new();
    let first_seq = state.send("one").unwrap().seq;
    let second_seq = state.send("two").unwrap().seq;
    assert!(second_seq > first_seq);
    assert!(first_seq > state.messages[0].seq);
    assert_eq!(state.last().unwrap().role, Role::User);
    assert_eq!(state.last().unwrap().content, "two");
}

#[test]
fn message_ids_are_unique() {
    let mut state = ChatState::new();
    state.send("a").unwrap();
    state.send("b").unwrap();
    let mut ids: Vec<_> = state.messages.iter().map(|m| m.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn can_send_tracks_input_and_typing() {
    let mut state = ChatState::new();
    assert!(!state.can_send("  "));
    assert!(state.can_send("hi"));
    state.begin_reveal("x");
    assert!(!state.can_send("hi"));
}

// =============================================================
// reveal
// =============================================================

#[test]
fn reveal_buffer_grows_one_char_per_tick() {
    let mut state = ChatState::new();
    state.begin_reveal("abc");
    let buffers = drain(&mut state);
    assert_eq!(buffers, vec!["a", "ab", "abc"]);
}

#[test]
fn reveal_buffer_is_non_decreasing_and_reaches_full_length() {
    let text = "The final exam will be held on May 20th, 2025.";
    let mut state = ChatState::new();
    state.begin_reveal(text);
    let buffers = drain(&mut state);
    let lengths: Vec<usize> = buffers.iter().map(String::len).collect();
    assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(buffers.last().map(String::as_str), Some(text));
}

#[test]
fn reveal_commit_appends_exactly_one_assistant_message() {
    let mut state = ChatState::new();
    state.send("hello").unwrap();
    state.begin_reveal("hi there");
    let before = state.messages.len();
    drain(&mut state);
    assert_eq!(state.messages.len(), before + 1);
    let last = state.last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "hi there");
    assert!(!state.is_typing);
    assert!(state.current_response.is_empty());
}

#[test]
fn reveal_handles_multibyte_characters() {
    let mut state = ChatState::new();
    state.begin_reveal("é✓");
    assert_eq!(state.advance_reveal(), RevealProgress::Revealing { shown: 1 });
    assert_eq!(state.current_response, "é");
    assert_eq!(state.advance_reveal(), RevealProgress::Revealing { shown: 2 });
    assert_eq!(state.current_response, "é✓");
    assert_eq!(state.advance_reveal(), RevealProgress::Committed);
}

#[test]
fn advance_without_reveal_is_idle() {
    let mut state = ChatState::new();
    assert_eq!(state.advance_reveal(), RevealProgress::Idle);
    assert_eq!(state.messages.len(), 1);
}

// =============================================================
// toggle_flag
// =============================================================

#[test]
fn toggle_flag_flips_value() {
    let mut state = ChatState::new();
    let id = state.messages[0].id;
    assert_eq!(state.toggle_flag(id), Ok(true));
    assert!(state.messages[0].flagged);
    assert_eq!(state.toggle_flag(id), Ok(false));
}

#[test]
fn toggle_flag_unknown_id() {
    let mut state = ChatState::new();
    let id = Uuid::new_v4();
    assert_eq!(state.toggle_flag(id), Err(ChatError::MessageNotFound(id)));
}

#[test]
fn chat_error_notices_are_destructive() {
    let notice = ChatError::EmptyInput.notice();
    assert!(notice.is_destructive());
    assert_eq!(notice.code.as_deref(), Some("E_EMPTY_INPUT"));
}

#[test]
fn message_serializes_role_lowercase() {
    let state = ChatState::new();
    let json = serde_json::to_value(&state.messages[0]).unwrap();
    assert_eq!(json["role"], "assistant");
    assert_eq!(json["flagged"], false);
}
