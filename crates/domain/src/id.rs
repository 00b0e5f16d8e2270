//! ID generation utilities.

use uuid::Uuid;

/// Generates a new UUID v7 as a string.
///
/// This is the id format for templates, environments and history entries.
/// UUID v7 carries a millisecond timestamp plus random bits, so ids created
/// within the same millisecond still differ and sort by creation time.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        // 8-4-4-4-12 = 36 chars
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_id_uniqueness_in_tight_loop() {
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
