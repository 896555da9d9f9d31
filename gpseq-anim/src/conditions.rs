//! Parsing of `condition:description` pairs.

use std::collections::BTreeMap;

use crate::error::FrontendError;

/// Splits `entry` on its first colon into `(condition, description)`.
///
/// # Errors
///
/// Returns [`FrontendError::MalformedCondition`] when `entry` has no colon.
pub fn parse_pair(entry: &str) -> Result<(String, String), FrontendError> {
    entry
        .split_once(':')
        .map(|(condition, description)| (condition.to_owned(), description.to_owned()))
        .ok_or_else(|| FrontendError::MalformedCondition(entry.to_owned()))
}

/// Builds the condition → description map.
///
/// Later entries overwrite earlier ones with the same condition name.
///
/// # Errors
///
/// Fails on the first malformed entry.
pub fn parse_descriptions<S: AsRef<str>>(
    entries: &[S],
) -> Result<BTreeMap<String, String>, FrontendError> {
    let mut descriptions = BTreeMap::new();
    for entry in entries {
        let (condition, description) = parse_pair(entry.as_ref())?;
        descriptions.insert(condition, description);
    }
    Ok(descriptions)
}

/// Renders the map back into `condition:description` entries.
#[must_use]
pub fn render_descriptions(descriptions: &BTreeMap<String, String>) -> Vec<String> {
    descriptions
        .iter()
        .map(|(condition, description)| format!("{condition}:{description}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_colon_only() {
        let (condition, description) = parse_pair("TK24:fixed 10:30, 5 min").unwrap();
        assert_eq!(condition, "TK24");
        assert_eq!(description, "fixed 10:30, 5 min");
    }

    #[test]
    fn test_empty_description_is_allowed() {
        assert_eq!(
            parse_pair("TK25:").unwrap(),
            ("TK25".to_owned(), String::new())
        );
    }

    #[test]
    fn test_missing_colon_is_an_error() {
        let err = parse_descriptions(&["TK24 no colon"]).unwrap_err();
        assert!(matches!(err, FrontendError::MalformedCondition(ref e) if e == "TK24 no colon"));
    }

    #[test]
    fn test_later_duplicates_win() {
        let map = parse_descriptions(&["a:first", "b:other", "a:second"]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "second");
        assert_eq!(map["b"], "other");
    }

    #[test]
    fn test_rendered_pairs_reparse_to_same_map() {
        let map = parse_descriptions(&["c1:1 min", "c2:2 min: long", "c3:"]).unwrap();
        let reparsed = parse_descriptions(&render_descriptions(&map)).unwrap();
        assert_eq!(map, reparsed);
    }
}
