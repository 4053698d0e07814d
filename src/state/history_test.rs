use super::*;

#[test]
fn seeded_history_has_five_items() {
    let state = HistoryState::seeded();
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.visible().len(), 5);
    assert_eq!(state.items[1].status, HistoryStatus::Flagged);
}

#[test]
fn search_matches_question_or_answer() {
    let state = HistoryState::seeded();
    assert_eq!(state.search("EXTENSION").len(), 1);
    // "vpn" only appears in an answer.
    assert_eq!(state.search("vpn").len(), 1);
    assert!(state.search("dormitory").is_empty());
}

#[test]
fn set_search_narrows_visible() {
    let mut state = HistoryState::seeded();
    state.set_search("machine learning");
    let visible = state.visible();
    assert_eq!(visible.len(), 1);
    assert!(visible[0].question.contains("Advanced Machine Learning"));
}

#[test]
fn toggle_expand_switches_and_collapses() {
    let mut state = HistoryState::seeded();
    let a = state.items[0].id;
    let b = state.items[1].id;
    state.toggle_expand(a);
    assert_eq!(state.expanded_id, Some(a));
    state.toggle_expand(b);
    assert_eq!(state.expanded_id, Some(b));
    state.toggle_expand(b);
    assert!(state.expanded_id.is_none());
}

#[test]
fn status_serializes_lowercase() {
    let json = serde_json::to_value(HistoryStatus::Resolved).unwrap();
    assert_eq!(json, "resolved");
}
