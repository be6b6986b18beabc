//! Best-effort extraction of a JSON object from free-form model text.

use serde_json::Value;

/// Pull a JSON object out of a model reply.
///
/// Strips one markdown fence (triple backticks, optional language tag) if
/// present, then parses the substring between the first `{` and the last
/// `}`. This is a heuristic, not a validator: any failure yields `None`
/// and the caller falls back to showing the raw text.
pub fn extract_json(text: &str) -> Option<Value> {
    let candidate = fenced_block(text).unwrap_or(text);
    let start = candidate.find('{')?;
    let end = candidate.rfind('}')?;
    let body = candidate.get(start..=end)?;
    serde_json::from_str(body).ok()
}

/// Contents of the first ``` ... ``` block, with any language tag on the
/// opening line removed.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let rest = &text[open + 3..];
    let close = rest.find("```")?;
    let inner = &rest[..close];
    Some(match inner.split_once('\n') {
        Some((_lang_tag, body)) => body,
        None => inner,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_fenced_block_with_language_tag() {
        let reply = "```json\n{\"plan\":\"x\",\"commands\":[]}\n```";
        assert_eq!(
            extract_json(reply),
            Some(json!({"plan": "x", "commands": []}))
        );
    }

    #[test]
    fn parses_a_fenced_block_without_language_tag() {
        let reply = "```\n{\"a\":1}\n```";
        assert_eq!(extract_json(reply), Some(json!({"a": 1})));
    }

    #[test]
    fn parses_an_object_surrounded_by_prose() {
        assert_eq!(extract_json("blah {\"a\":1} blah"), Some(json!({"a": 1})));
    }

    #[test]
    fn returns_none_when_there_is_no_json() {
        assert_eq!(extract_json("no json here"), None);
    }

    #[test]
    fn returns_none_on_malformed_json() {
        assert_eq!(extract_json("{\"a\": }"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn prefers_the_fenced_block_over_surrounding_prose() {
        let reply = "Here {not json} first:\n```json\n{\"a\":2}\n```\ndone";
        assert_eq!(extract_json(reply), Some(json!({"a": 2})));
    }
}
