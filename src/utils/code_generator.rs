//! Random short code generation.
//!
//! Codes are drawn uniformly from a 62-symbol alphanumeric alphabet. The
//! generator does not check uniqueness; the allocator does.

use rand::Rng;

/// Symbols a short code may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Longest code the schema accepts.
pub const MAX_CODE_LENGTH: usize = 32;

/// Generates a random code of exactly `length` characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(4);
/// assert_eq!(code.len(), 4);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` could have been produced by [`generate_code`].
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
