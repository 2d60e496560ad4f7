//! Admin credential generation.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of a generated admin password.
pub const PASSWORD_LEN: usize = 8;

/// Generate a random alphanumeric password of `len` characters.
///
/// The result is printable ASCII only, so it is safe to embed in a
/// container environment variable or a shell-quoted log line.
pub fn generate_password(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_has_requested_length() {
        assert_eq!(generate_password(PASSWORD_LEN).len(), 8);
        assert_eq!(generate_password(32).len(), 32);
    }

    #[test]
    fn password_is_alphanumeric_only() {
        let pw = generate_password(256);
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_passwords_differ() {
        // 62^32 possibilities; a collision here means the RNG is broken.
        assert_ne!(generate_password(32), generate_password(32));
    }
}
