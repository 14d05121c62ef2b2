//! Final outcome of a validation run and how it is reported to the harness.

use std::io::Write;
use std::process::ExitCode;

use crate::error::Rejection;

/// Exit status signalling an accepted stream.
pub const EXIT_ACCEPTED: u8 = 42;

/// Exit status signalling a rejected stream.
pub const EXIT_REJECTED: u8 = 43;

/// Accepted or Rejected. Both are terminal.
#[derive(Debug)]
pub enum Verdict {
    Accepted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// The rejection, if any.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(r) => Some(r),
        }
    }

    /// Raw process exit status for this verdict.
    pub fn code(&self) -> u8 {
        match self {
            Verdict::Accepted => EXIT_ACCEPTED,
            Verdict::Rejected(_) => EXIT_REJECTED,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// The single diagnostic line, or `None` when there is nothing to print.
    pub fn diagnostic(&self) -> Option<String> {
        self.rejection()
            .map(ToString::to_string)
            .filter(|line| !line.is_empty())
    }

    /// Write the diagnostic line (if any) to `out`.
    pub fn report<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if let Some(line) = self.diagnostic() {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    /// Print the diagnostic to stdout and terminate the process.
    pub fn exit(self) -> ! {
        let stdout = std::io::stdout();
        // The exit code carries the verdict even if stdout is closed.
        let _ = self.report(&mut stdout.lock());
        std::process::exit(i32::from(self.code()))
    }
}

impl From<Result<(), Rejection>> for Verdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Verdict::Accepted,
            Err(r) => Verdict::Rejected(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        assert_eq!(Verdict::Accepted.code(), 42);
        assert_eq!(Verdict::Rejected(Rejection::custom("x")).code(), 43);
        assert_ne!(EXIT_ACCEPTED, EXIT_REJECTED);
    }

    #[test]
    fn test_report_accepted_prints_nothing() {
        let mut out = Vec::new();
        Verdict::Accepted.report(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_rejected_prints_one_line() {
        let verdict = Verdict::Rejected(Rejection::expected("space", "\"x\""));
        let mut out = Vec::new();
        verdict.report(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Expected space, found \"x\"\n");
    }

    #[test]
    fn test_empty_rejection_prints_nothing() {
        let verdict = Verdict::Rejected(Rejection::expected("", ""));
        assert!(verdict.diagnostic().is_none());
        assert!(!verdict.is_accepted());
    }

    #[test]
    fn test_from_result() {
        assert!(Verdict::from(Ok(())).is_accepted());
        let verdict = Verdict::from(Err(Rejection::custom("bad")));
        assert_eq!(verdict.diagnostic().as_deref(), Some("bad"));
    }
}
