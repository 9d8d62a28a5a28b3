use super::proto::StringList;
use crate::story::{StoryContent, ValidationError};

/// Empty wire strings mean "not provided".
pub fn nonempty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Unwrap a tag-list patch into its values.
pub fn tag_values(list: Option<StringList>) -> Option<Vec<String>> {
    list.map(|l| l.values)
}

/// Parse a JSON-encoded content payload from the wire. Empty and absent both
/// mean "not provided".
pub fn parse_content(
    content_json: Option<String>,
) -> Result<Option<StoryContent>, ValidationError> {
    match content_json.and_then(nonempty) {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|_| ValidationError {
            field: "content",
            message: "Story content must be valid JSON".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonempty() {
        assert_eq!(nonempty(String::new()), None);
        assert_eq!(nonempty("x".to_string()), Some("x".to_string()));
    }

    #[test]
    fn test_parse_content_absent() {
        assert_eq!(parse_content(None).unwrap(), None);
        assert_eq!(parse_content(Some(String::new())).unwrap(), None);
    }

    #[test]
    fn test_parse_content_text_payload() {
        let parsed = parse_content(Some("\"plain words\"".to_string())).unwrap();
        assert_eq!(parsed, Some(StoryContent::Text("plain words".to_string())));
    }

    #[test]
    fn test_parse_content_invalid_json() {
        let err = parse_content(Some("{not json".to_string())).unwrap_err();
        assert_eq!(err.field, "content");
    }
}
