//! Property-based tests for the JSONL parser.
//!
//! Uses proptest to fuzz the parser with generated inputs to ensure
//! it handles arbitrary data without panicking or failing.

use cchistory::model::Role;
use cchistory::parser::TranscriptParser;
use proptest::prelude::*;

/// A well-formed user or assistant line with the given text.
fn chat_line() -> impl Strategy<Value = (bool, String)> {
    (any::<bool>(), "[a-zA-Z0-9 .,!?]{1,40}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Parsing a string never fails, whatever it contains.
    #[test]
    fn parser_never_fails_on_arbitrary_bytes(bytes in prop::collection::vec(any::<u8>(), 0..4096)) {
        let content = String::from_utf8_lossy(&bytes);
        let mut parser = TranscriptParser::new();
        prop_assert!(parser.parse_str(&content).is_ok());
    }

    /// Raw bytes, valid UTF-8 or not, never fail a read either.
    #[test]
    fn parser_never_fails_on_raw_reader(bytes in prop::collection::vec(any::<u8>(), 0..4096)) {
        let mut parser = TranscriptParser::new();
        prop_assert!(parser.parse_reader(bytes.as_slice()).is_ok());

        let stats = parser.stats();
        prop_assert_eq!(
            stats.lines_processed,
            stats.messages + stats.records_skipped + stats.malformed_lines + stats.empty_lines
        );
    }

    /// Every line read lands in exactly one stats bucket.
    #[test]
    fn parser_stats_are_consistent(lines in prop::collection::vec("[^\n]*", 1..50)) {
        let content = lines.join("\n");
        let mut parser = TranscriptParser::new();
        let messages = parser.parse_str(&content).unwrap();

        let stats = parser.stats();
        prop_assert_eq!(
            stats.lines_processed,
            stats.messages + stats.records_skipped + stats.malformed_lines + stats.empty_lines
        );
        prop_assert_eq!(messages.len(), stats.messages);
        prop_assert!(messages.iter().all(|m| !m.content.is_empty()));
    }

    /// Well-formed chat lines come back in order with their text intact.
    #[test]
    fn chat_lines_preserve_order(entries in prop::collection::vec(chat_line(), 0..30)) {
        let content: String = entries
            .iter()
            .map(|(is_user, text)| {
                let line = if *is_user {
                    serde_json::json!({"type": "user", "message": {"content": text}})
                } else {
                    serde_json::json!({
                        "type": "assistant",
                        "message": {"content": [{"type": "text", "text": text}]}
                    })
                };
                format!("{line}\n")
            })
            .collect();

        let mut parser = TranscriptParser::new();
        let messages = parser.parse_str(&content).unwrap();

        prop_assert_eq!(messages.len(), entries.len());
        for (message, (is_user, text)) in messages.iter().zip(&entries) {
            let role = if *is_user { Role::User } else { Role::Assistant };
            prop_assert_eq!(message.role, role);
            prop_assert_eq!(&message.content, text);
        }
    }
}
