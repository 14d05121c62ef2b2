//! # streamcheck-core
//!
//! Token-level input validation for judging systems.
//!
//! A validator reads one stream (a test data file or a contestant's output)
//! and decides whether it matches a problem's format exactly. The outcome is
//! a [`Verdict`], reported to the judging harness through the exit status:
//! [`EXIT_ACCEPTED`] (42) or [`EXIT_REJECTED`] (43), plus at most one
//! diagnostic line on stdout.
//!
//! ## Key Guarantees
//!
//! 1. **First rejection wins**: every read returns `Result<_, Rejection>`;
//!    propagating with `?` stops all further reads.
//! 2. **Exactly one verdict**: [`validate`] runs the final end-of-stream
//!    check only when the client succeeded.
//! 3. **Two whitespace modes**: lenient (runs of whitespace separate tokens)
//!    or strict (every space and newline is matched explicitly).
//!
//! ## Example
//!
//! ```rust,no_run
//! use streamcheck_core::{run, Rejection};
//!
//! fn main() {
//!     run(|v| {
//!         let n = v.read_integer_in(1, 1000)?;
//!         v.newline()?;
//!         for i in 0..n {
//!             if i > 0 {
//!                 v.space()?;
//!             }
//!             v.read_integer_in(-1_000_000, 1_000_000)?;
//!         }
//!         v.newline()?;
//!         Ok::<(), Rejection>(())
//!     })
//! }
//! ```

pub mod error;
pub mod policy;
pub mod token;
pub mod validator;
pub mod verdict;

// Re-export main types at crate root
pub use error::{Rejection, RejectionKind};
pub use policy::{Policy, CASE_SENSITIVE_FLAG, SPACE_CHANGE_SENSITIVE_FLAG};
pub use validator::Validator;
pub use verdict::{Verdict, EXIT_ACCEPTED, EXIT_REJECTED};

use std::io::BufRead;

/// Validate one stream.
///
/// Builds a [`Validator`], hands it to `client`, and runs the end-of-stream
/// check if the client returned `Ok`. The client may use any error type that
/// converts from [`Rejection`] and back.
pub fn validate<R, F, E>(input: R, policy: Policy, client: F) -> Verdict
where
    R: BufRead,
    F: FnOnce(&mut Validator<R>) -> Result<(), E>,
    E: Into<Rejection>,
{
    let mut validator = Validator::new(input, policy);
    let result = match client(&mut validator) {
        Ok(()) => validator.finish(),
        Err(e) => Err(e.into()),
    };
    let verdict = Verdict::from(result);

    match verdict.rejection() {
        None => tracing::debug!("stream accepted"),
        Some(r) => tracing::debug!(kind = ?r.kind(), reason = %r, "stream rejected"),
    }

    verdict
}

/// Validate standard input using flags from the process arguments, then
/// exit with the verdict's status.
pub fn run<F, E>(client: F) -> !
where
    F: FnOnce(&mut Validator<std::io::StdinLock<'static>>) -> Result<(), E>,
    E: Into<Rejection>,
{
    let policy = Policy::from_args(std::env::args_os());
    validate(std::io::stdin().lock(), policy, client).exit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_matching_stream() {
        let verdict = validate("2\n10 20\n".as_bytes(), Policy::strict(), |v| {
            let n = v.read_integer_in(1, 10)?;
            v.newline()?;
            for i in 0..n {
                if i > 0 {
                    v.space()?;
                }
                v.read_integer()?;
            }
            v.newline()
        });
        assert!(verdict.is_accepted());
        assert_eq!(verdict.code(), EXIT_ACCEPTED);
    }

    #[test]
    fn test_validate_empty_stream_without_reads() {
        let verdict = validate("".as_bytes(), Policy::lenient(), |_| Ok::<(), Rejection>(()));
        assert!(verdict.is_accepted());
    }

    #[test]
    fn test_validate_empty_stream_with_read() {
        let verdict = validate("".as_bytes(), Policy::lenient(), |v| {
            v.read_string()?;
            Ok::<(), Rejection>(())
        });
        assert_eq!(verdict.code(), EXIT_REJECTED);
        assert_eq!(
            verdict.diagnostic().as_deref(),
            Some("Expected string, found nothing")
        );
    }

    #[test]
    fn test_validate_first_rejection_wins() {
        // The client rejects before consuming "junk"; finish must not run.
        let verdict = validate("150 junk".as_bytes(), Policy::lenient(), |v| {
            v.read_integer_in(1, 100)?;
            v.read_integer()?;
            Ok::<(), Rejection>(())
        });
        assert_eq!(
            verdict.diagnostic().as_deref(),
            Some("Expected integer between 1 and 100, found 150")
        );
    }

    #[test]
    fn test_validate_trailing_content() {
        let verdict = validate("1 2".as_bytes(), Policy::lenient(), |v| {
            v.read_integer()?;
            Ok::<(), Rejection>(())
        });
        let rejection = verdict.rejection().unwrap();
        assert_eq!(rejection.kind(), RejectionKind::TrailingContent);
    }

    #[test]
    fn test_validate_custom_failure() {
        let client = |v: &mut Validator<&[u8]>| -> Result<(), Rejection> {
            let a = v.read_integer()?;
            let b = v.read_integer()?;
            if a == b {
                crate::fail!("Endpoints ", a, " and ", b, " must differ");
            }
            Ok(())
        };
        let verdict = validate("3 3".as_bytes(), Policy::lenient(), client);
        assert_eq!(
            verdict.diagnostic().as_deref(),
            Some("Endpoints 3 and 3 must differ")
        );
    }
}
