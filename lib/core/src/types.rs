use serde::Serialize;

/// Envelope for paginated listings: one page of items plus the total
/// match count across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

/// New record id: a random UUIDv4 rendered as 32 hex characters.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Current UTC time as RFC 3339. Stored as text, these timestamps sort
/// chronologically under plain string comparison, which is what the
/// created-at ordering relies on.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_hex_and_distinct() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn timestamps_sort_chronologically_as_text() {
        let earlier = now_rfc3339();
        let later = now_rfc3339();
        assert!(earlier <= later);
    }
}
