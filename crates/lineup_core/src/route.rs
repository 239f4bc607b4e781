pub type SearchId = i64;

/// Parses the search id out of a validation page path.
///
/// Expected shape: `/validate/{integer}/...`. Any other shape, a missing
/// segment or a non-integer id yields `None`; a page that does not match the
/// convention simply never polls.
pub fn search_id_from_path(path: &str) -> Option<SearchId> {
    let mut segments = path.split('/');
    // An absolute path starts with an empty segment before the first slash.
    if !segments.next()?.is_empty() {
        return None;
    }
    if segments.next()? != "validate" {
        return None;
    }
    segments.next()?.parse().ok()
}
