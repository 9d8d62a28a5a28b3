//! Slug derivation and validation.
//!
//! A slug is derived from the title at first publish and never regenerated:
//! lowercase, every run of non-alphanumeric characters collapsed to a single
//! hyphen, leading/trailing hyphens trimmed, truncated to 60 characters.
//! Collisions are resolved by the publish workflow with `-1`, `-2`, ...

use thiserror::Error;

const MAX_SLUG_LEN: usize = 60;

/// Base used when a title normalizes to nothing (all punctuation).
pub const FALLBACK_SLUG_BASE: &str = "untitled";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlugError {
    #[error("Slug cannot be empty")]
    Empty,

    #[error("Slug can only contain lowercase alphanumeric characters and hyphens")]
    InvalidCharacters,
}

/// Derive the base slug for a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// Derive the base slug for a title, falling back to [`FALLBACK_SLUG_BASE`]
/// when the title contains no alphanumeric characters at all.
pub fn slug_base(title: &str) -> String {
    let base = slugify(title);
    if base.is_empty() {
        FALLBACK_SLUG_BASE.to_string()
    } else {
        base
    }
}

/// Build the nth candidate for a base: the base itself, then `base-1`, ...
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

/// Check that a slug is safe to use as a reservation file name.
pub fn validate_slug(slug: &str) -> Result<(), SlugError> {
    if slug.is_empty() {
        return Err(SlugError::Empty);
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SlugError::InvalidCharacters);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Journey"), "my-journey");
        assert_eq!(slugify("A Gentle Descent into Light"), "a-gentle-descent-into-light");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("My Journey!!"), "my-journey");
        assert_eq!(slugify("what -- happened?"), "what-happened");
        assert_eq!(slugify("a  b\t c"), "a-b-c");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  spaced  "), "spaced");
        assert_eq!(slugify("...dots..."), "dots");
    }

    #[test]
    fn test_slugify_is_deterministic_on_normal_form() {
        // Titles with the same normal form produce the same base slug.
        assert_eq!(slugify("My Journey"), slugify("my journey!"));
        assert_eq!(slugify("My Journey"), slugify("MY-JOURNEY"));
    }

    #[test]
    fn test_slugify_truncates_to_60() {
        let long = "a".repeat(100);
        assert_eq!(slugify(&long).len(), 60);
    }

    #[test]
    fn test_slug_base_fallback() {
        assert_eq!(slug_base("!!!"), FALLBACK_SLUG_BASE);
        assert_eq!(slug_base("My Journey"), "my-journey");
    }

    #[test]
    fn test_slug_candidates() {
        assert_eq!(slug_candidate("my-journey", 0), "my-journey");
        assert_eq!(slug_candidate("my-journey", 1), "my-journey-1");
        assert_eq!(slug_candidate("my-journey", 2), "my-journey-2");
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("my-journey").is_ok());
        assert!(validate_slug("my-journey-1").is_ok());
        assert_eq!(validate_slug(""), Err(SlugError::Empty));
        assert_eq!(validate_slug("My-Journey"), Err(SlugError::InvalidCharacters));
        assert_eq!(validate_slug("has space"), Err(SlugError::InvalidCharacters));
        assert_eq!(validate_slug("../escape"), Err(SlugError::InvalidCharacters));
    }

    #[test]
    fn test_non_ascii_characters_become_hyphens() {
        assert_eq!(slugify("café au lait"), "caf-au-lait");
    }
}
