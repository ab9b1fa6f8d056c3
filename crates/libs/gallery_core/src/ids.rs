use gallery_types::PROVISIONAL_ID_PREFIX;

/// Generate a URL-safe random id of a given length.
#[must_use]
pub fn nice_id(length: usize) -> String {
    const URL_SAFE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_";
    (0..length)
        .map(|_| {
            let idx = rand::random_range(0..URL_SAFE.len());
            URL_SAFE[idx] as char
        })
        .collect()
}

/// Provisional client-side photo id, replaced by the server-assigned id
/// once `create_photos` confirms.
#[must_use]
pub fn provisional_id() -> String {
    format!("{PROVISIONAL_ID_PREFIX}{}", nice_id(12))
}
