//! Random alias generation.
//!
//! Aliases are drawn with replacement from the 62 ASCII alphanumerics. The
//! generator is not cryptographically secure and collisions are possible;
//! callers must handle `Conflict` on insert.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Default alias length.
pub const DEFAULT_ALIAS_LENGTH: usize = 10;

/// Generates an alias of `length` characters using the thread-local RNG.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias(10);
/// assert_eq!(alias.len(), 10);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(length: usize) -> String {
    generate_alias_with(&mut rand::rng(), length)
}

/// Generates an alias from an explicit random source.
pub fn generate_alias_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
