//! Passphrase suggestions for galleries entering a gated status.
//!
//! A convenience default in the shape `{adjective}-{noun}-{two digits}`,
//! not a security-grade secret generator. Users can overwrite the
//! suggestion before saving.

const ADJECTIVES: [&str; 4] = ["peach", "sunny", "bright", "calm"];
const NOUNS: [&str; 4] = ["glow", "river", "cloud", "leaf"];

#[must_use]
pub fn suggest_passphrase() -> String {
    let adjective = ADJECTIVES[rand::random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rand::random_range(0..NOUNS.len())];
    let number = rand::random_range(10..100u32);
    format!("{adjective}-{noun}-{number}")
}
