//! Exit code definitions for the gxwf CLI
//!
//! Scripts rely on these values. Changing an existing code is a breaking
//! change and requires a major version bump.

/// Exit codes for the gxwf CLI application.
///
/// Each error kind the tool can report maps to its own code so that scripts
/// can tell a missing login apart from an unreachable server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error
    GeneralError = 1,

    /// User input error: invalid arguments, conflicting selectors, malformed file
    UsageError = 2,

    /// The Galaxy server could not be reached
    NetworkError = 3,

    /// The Galaxy server rejected the API key
    AuthError = 4,

    /// Login, alias or remote object does not exist
    NotFound = 5,

    /// Login name taken, or the login is in use
    Conflict = 6,

    /// No login has been configured yet
    ConfigMissing = 7,

    /// Configuration file cannot be used
    ConfigCorrupt = 8,

    /// A remote operation failed after the session was established
    RemoteFailed = 9,

    /// Operation was interrupted (e.g., Ctrl+C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            6 => Some(Self::Conflict),
            7 => Some(Self::ConfigMissing),
            8 => Some(Self::ConfigCorrupt),
            9 => Some(Self::RemoteFailed),
            130 => Some(Self::Interrupted),
            _ => None,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid arguments or input file",
            Self::NetworkError => "Galaxy server unreachable",
            Self::AuthError => "Authentication failure",
            Self::NotFound => "Not found",
            Self::Conflict => "Conflict with existing login",
            Self::ConfigMissing => "No login configured",
            Self::ConfigCorrupt => "Configuration file unusable",
            Self::RemoteFailed => "Remote operation failed",
            Self::Interrupted => "Operation interrupted",
        }
    }
}

impl From<&gxwf_core::Error> for ExitCode {
    fn from(error: &gxwf_core::Error) -> Self {
        Self::from_i32(error.exit_code()).unwrap_or(Self::GeneralError)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gxwf_core::Error;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UsageError.as_i32(), 2);
        assert_eq!(ExitCode::ConfigMissing.as_i32(), 7);
        assert_eq!(ExitCode::ConfigCorrupt.as_i32(), 8);
        assert_eq!(ExitCode::RemoteFailed.as_i32(), 9);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_exit_code_from_i32_round_trip() {
        for code in [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 130] {
            assert_eq!(ExitCode::from_i32(code).map(ExitCode::as_i32), Some(code));
        }
        assert_eq!(ExitCode::from_i32(99), None);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from(&Error::ConfigMissing("x".into())),
            ExitCode::ConfigMissing
        );
        assert_eq!(
            ExitCode::from(&Error::Unreachable("x".into())),
            ExitCode::NetworkError
        );
        assert_eq!(
            ExitCode::from(&Error::Unauthorized("x".into())),
            ExitCode::AuthError
        );
        assert_eq!(
            ExitCode::from(&Error::UnknownLogin("prod".into())),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from(&Error::ActiveLogin("prod".into())),
            ExitCode::Conflict
        );
        assert_eq!(
            ExitCode::from(&Error::AmbiguousDelete("x".into())),
            ExitCode::UsageError
        );
        assert_eq!(
            ExitCode::from(&Error::RemoteOperationFailed("x".into())),
            ExitCode::RemoteFailed
        );
        assert_eq!(
            ExitCode::from(&Error::General("x".into())),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_exit_code_display() {
        let display = format!("{}", ExitCode::NotFound);
        assert!(display.contains("5"));
        assert!(display.contains("Not found"));
    }
}
