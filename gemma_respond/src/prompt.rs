use std::fmt::Write;

use crate::model::conversation::{ChatMessage, Role};

pub const START_OF_TURN: &str = "<start_of_turn>";
pub const END_OF_TURN: &str = "<end_of_turn>";

/// Flattens chat turns into a gemma prompt, ending on an open model turn so
/// generation continues as the assistant.
pub fn format_prompt(messages: &[ChatMessage]) -> String {
    let mut prompt_txt = String::new();
    for ChatMessage { role, content } in messages {
        _ = write!(
            prompt_txt,
            "{START_OF_TURN}{}\n{content}{END_OF_TURN}\n",
            role.turn_label()
        );
    }

    _ = write!(
        prompt_txt,
        "{START_OF_TURN}{}\n",
        Role::Assistant.turn_label()
    );
    prompt_txt
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn prompt_empty_history_only_opens_model_turn() {
        assert_eq!(format_prompt(&[]), "<start_of_turn>model\n");
    }

    #[test]
    fn prompt_single_user_turn() {
        let prompt_txt = format_prompt(&[ChatMessage::from_user("Hello")]);
        assert_eq!(
            prompt_txt,
            "<start_of_turn>user\nHello<end_of_turn>\n<start_of_turn>model\n"
        );
    }

    #[test]
    fn prompt_keeps_turn_order() {
        let messages = [
            ChatMessage::from_user("A"),
            ChatMessage::from_model("B"),
            ChatMessage::from_user("C"),
        ];
        let prompt_txt = format_prompt(&messages);

        assert_eq!(
            prompt_txt,
            concat!(
                "<start_of_turn>user\nA<end_of_turn>\n",
                "<start_of_turn>model\nB<end_of_turn>\n",
                "<start_of_turn>user\nC<end_of_turn>\n",
                "<start_of_turn>model\n"
            )
        );
    }

    #[test]
    fn prompt_has_one_marker_pair_per_message_plus_open_turn() {
        let messages = [
            ChatMessage::from_user("one"),
            ChatMessage::from_user("two"),
            ChatMessage::from_model("three"),
            ChatMessage::from_model("four"),
            ChatMessage::from_user("five"),
        ];
        let prompt_txt = format_prompt(&messages);

        assert_eq!(prompt_txt.matches(START_OF_TURN).count(), messages.len() + 1);
        assert_eq!(prompt_txt.matches(END_OF_TURN).count(), messages.len());
        assert!(prompt_txt.ends_with("<end_of_turn>\n<start_of_turn>model\n"));

        let mut last_idx = 0;
        for message in &messages {
            let idx = prompt_txt[last_idx..]
                .find(&message.content)
                .expect("message content missing from prompt");
            last_idx += idx + message.content.len();
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let messages = [ChatMessage::from_user("hi"), ChatMessage::from_model("hey")];
        assert_eq!(format_prompt(&messages), format_prompt(&messages));
    }

    #[test]
    fn prompt_passes_content_through_verbatim() {
        let content = "line one\nline two <b>{braces}</b>";
        let prompt_txt = format_prompt(&[ChatMessage::from_user(content)]);
        assert!(prompt_txt.contains(&format!("user\n{content}<end_of_turn>")));
    }
}
