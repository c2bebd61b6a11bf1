use rand::{Rng, distributions::Alphanumeric};

/// Length of a password reset code. 32 alphanumeric characters is just
/// under 191 bits of entropy, far beyond online guessing within the code's
/// validity window.
pub const RESET_CODE_LENGTH: usize = 32;

/// Generates a random alphanumeric secret of the specified length.
///
/// The generated string contains uppercase letters (A-Z), lowercase letters
/// (a-z), and digits (0-9), sampled from the thread-local CSPRNG. Used for
/// password reset codes; all codes share one fixed length so comparing them
/// leaks nothing through length.
pub fn generate_reset_code(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_has_requested_length_and_charset() {
        let code = generate_reset_code(RESET_CODE_LENGTH);
        assert_eq!(code.len(), RESET_CODE_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn codes_are_not_repeated() {
        assert_ne!(
            generate_reset_code(RESET_CODE_LENGTH),
            generate_reset_code(RESET_CODE_LENGTH)
        );
    }
}
