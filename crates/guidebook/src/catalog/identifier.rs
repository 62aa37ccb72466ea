/// Shortest token the storage layer issues as a primary key.
pub const MIN_ID_LEN: usize = 25;
/// Longest token accepted as a primary key.
pub const MAX_ID_LEN: usize = 32;

/// Lookup mode selected for an inbound identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    Id,
    Slug,
}

/// Classifies an identifier as a storage-issued ID (CUID shape) or a human slug.
///
/// An ID is lowercase ASCII alphanumeric, starts with a letter and is between
/// [`MIN_ID_LEN`] and [`MAX_ID_LEN`] characters long. Everything else, including the empty
/// string, is a slug.
pub fn classify(identifier: &str) -> IdentifierKind {
    let bytes = identifier.as_bytes();
    let shaped = (MIN_ID_LEN..=MAX_ID_LEN).contains(&bytes.len())
        && bytes[0].is_ascii_lowercase()
        && bytes
            .iter()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit());

    if shaped {
        IdentifierKind::Id
    } else {
        IdentifierKind::Slug
    }
}
