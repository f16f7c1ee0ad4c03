pub mod ident;
pub mod ip;
pub mod password;

/// Generate a random alphanumeric secret of the given length.
pub fn generate_secure_token(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

/// Check whether a string is usable as a lure path.
///
/// Lure lookup is an exact byte-for-byte match against the request path, so
/// the stored value must look like a request path: absolute, non-root, and
/// free of whitespace and control characters.
pub fn is_valid_lure_path(path: &str) -> bool {
    path.len() > 1
        && path.starts_with('/')
        && !path.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secure_token_length_and_charset() {
        let token = generate_secure_token(32);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_secure_token_is_random() {
        assert_ne!(generate_secure_token(24), generate_secure_token(24));
    }

    #[test]
    fn test_valid_lure_paths() {
        assert!(is_valid_lure_path("/promo"));
        assert!(is_valid_lure_path("/a/b/c"));
        assert!(is_valid_lure_path("/foto-2024.html"));
    }

    #[test]
    fn test_invalid_lure_paths() {
        assert!(!is_valid_lure_path(""));
        assert!(!is_valid_lure_path("/"));
        assert!(!is_valid_lure_path("promo"));
        assert!(!is_valid_lure_path("/with space"));
        assert!(!is_valid_lure_path("/tab\there"));
        assert!(!is_valid_lure_path("/line\nbreak"));
    }
}
