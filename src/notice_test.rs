use super::*;

#[derive(Debug)]
struct Empty;

impl std::fmt::Display for Empty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("empty")
    }
}

impl ErrorCode for Empty {
    fn error_code(&self) -> &'static str {
        "E_EMPTY"
    }
}

#[test]
fn info_notice_has_default_tone_and_no_code() {
    let notice = Notice::info("Response sent", "Your response has been sent to the student.");
    assert_eq!(notice.tone, Tone::Default);
    assert!(!notice.is_destructive());
    assert!(notice.code.is_none());
}

#[test]
fn rejected_notice_carries_error_code() {
    let notice = Notice::rejected(&Empty, "Nope", "Try again.");
    assert!(notice.is_destructive());
    assert_eq!(notice.code.as_deref(), Some("E_EMPTY"));
    assert_eq!(notice.title, "Nope");
}

#[test]
fn notice_serializes_lowercase_tone_and_skips_missing_code() {
    let json = serde_json::to_value(Notice::info("a", "b")).unwrap();
    assert_eq!(json["tone"], "default");
    assert!(json.get("code").is_none());
}
