pub const DEFAULT_FOLDER: &str = "uploads";

/// Folder for an upload batch: `{entity_type}/{entity_id}` when both are
/// present and non-blank, otherwise `default`.
pub fn resolve_folder(entity_type: Option<&str>, entity_id: Option<&str>, default: &str) -> String {
    let entity_type = entity_type.map(|t| t.trim().trim_end_matches('/')).unwrap_or("");
    let entity_id = entity_id.map(str::trim).unwrap_or("");

    if entity_type.is_empty() || entity_id.is_empty() {
        return default.to_string();
    }
    format!("{}/{}", entity_type, entity_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_folder() {
        assert_eq!(resolve_folder(Some("products/"), Some("42"), DEFAULT_FOLDER), "products/42");
        assert_eq!(resolve_folder(Some(" users "), Some(" 7 "), DEFAULT_FOLDER), "users/7");
    }

    #[test]
    fn test_falls_back_to_default() {
        assert_eq!(resolve_folder(None, Some("42"), DEFAULT_FOLDER), "uploads");
        assert_eq!(resolve_folder(Some("products"), None, DEFAULT_FOLDER), "uploads");
        assert_eq!(resolve_folder(Some("  "), Some("42"), DEFAULT_FOLDER), "uploads");
        assert_eq!(resolve_folder(Some("/"), Some("42"), DEFAULT_FOLDER), "uploads");
        assert_eq!(resolve_folder(Some("products"), Some(""), "misc"), "misc");
    }
}
