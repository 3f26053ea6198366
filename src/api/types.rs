use serde::Deserialize;
use serde_json::Value;

/// The recognized slice of the `meta` object attached to listing responses.
/// Everything else in `meta` is passed through untouched in the raw value.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Meta {
    #[serde(default)]
    pub next: Option<String>,
}

impl Meta {
    /// Extracts the `meta` object from a decoded response. Responses without
    /// one, or with a `meta` of an unexpected shape, yield `None`.
    pub fn of(response: &Value) -> Option<Meta> {
        response
            .get("meta")
            .and_then(|meta| serde_json::from_value(meta.clone()).ok())
    }

    /// The pagination cursor, if the service reported more results.
    /// An empty `next` string means the listing is exhausted.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_of_response_with_next() {
        let response = json!({"results": [], "meta": {"next": "https://api.meetup.com/2/events?offset=1", "count": 200}});
        let meta = Meta::of(&response).unwrap();
        assert_eq!(
            meta.next_url(),
            Some("https://api.meetup.com/2/events?offset=1")
        );
    }

    #[test]
    fn test_meta_of_response_without_meta() {
        assert_eq!(Meta::of(&json!({"results": []})), None);
    }

    #[test]
    fn test_meta_next_url_empty_string_is_none() {
        let meta = Meta { next: Some(String::new()) };
        assert_eq!(meta.next_url(), None);
    }

    #[test]
    fn test_meta_next_url_absent_is_none() {
        let meta = Meta::of(&json!({"meta": {"count": 3}})).unwrap();
        assert_eq!(meta.next_url(), None);
    }
}
