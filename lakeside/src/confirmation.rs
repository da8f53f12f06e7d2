//! Confirmation code generation.
//!
//! Codes are random and never derived from booking content, so cancelling a
//! stay and booking it again yields a new code. Uniqueness is enforced by the
//! store; generators only need to make collisions unlikely.

use rand::Rng;

use crate::booking::ConfirmationCode;

/// Produces guest-facing confirmation codes.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmationCodeGenerator: Send + Sync {
    /// Returns a fresh ten-digit code.
    fn generate(&self) -> ConfirmationCode;
}

/// Draws each digit from the thread-local RNG.
///
/// # Examples
///
/// ```
/// use lakeside::{ConfirmationCodeGenerator, RandomCodeGenerator};
///
/// let code = RandomCodeGenerator.generate();
/// assert_eq!(code.as_str().len(), 10);
/// assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl ConfirmationCodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ConfirmationCode {
        const DIGITS: &[u8] = b"0123456789";

        let mut rng = rand::rng();
        let code: String = (0..ConfirmationCode::LEN)
            .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
            .collect();

        ConfirmationCode::from_digits(code)
    }
}

/// Any `Fn() -> ConfirmationCode` is a generator. Handy for scripted tests.
impl<F> ConfirmationCodeGenerator for F
where
    F: Fn() -> ConfirmationCode + Send + Sync,
{
    fn generate(&self) -> ConfirmationCode {
        self()
    }
}
