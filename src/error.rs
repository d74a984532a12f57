// SFCScript - SNES address conversion and table-driven script extraction
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Error types for SFCScript.
//!
//! Only conditions that indicate caller misuse or failed I/O are errors.
//! Malformed table lines, truncated block scans and pointers that do not
//! resolve are recorded and logged by the components that meet them.

use std::path::Path;
use thiserror::Error;

/// Error codes for the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Input errors (E001-E009)
    InvalidAddressLiteral,
    UnsupportedHexWidth,
    InvalidCodeWidth,
    InvalidPointerWidth,

    // Data errors (E010-E019)
    PointerTableOutOfRange,
    UnencodableText,
    OffsetOutOfRange,

    // Environment errors (E100-E109)
    Io,
    InvalidJob,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidAddressLiteral => "E001",
            ErrorCode::UnsupportedHexWidth => "E002",
            ErrorCode::InvalidCodeWidth => "E003",
            ErrorCode::InvalidPointerWidth => "E004",

            ErrorCode::PointerTableOutOfRange => "E010",
            ErrorCode::UnencodableText => "E011",
            ErrorCode::OffsetOutOfRange => "E012",

            ErrorCode::Io => "E100",
            ErrorCode::InvalidJob => "E101",
        }
    }
}

/// A toolkit error.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct ToolError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl ToolError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    /// Create an I/O error mentioning the affected path.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        Self::new(ErrorCode::Io, format!("{}: {}", path.display(), err))
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for toolkit operations.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Format an error for terminal output.
pub fn format_error(error: &ToolError) -> String {
    let mut output = format!("error[{}]: {}\n", error.code_str(), error.message);

    if let Some(hint) = &error.hint {
        output.push_str(&format!("  = hint: {}\n", hint));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(ErrorCode::InvalidAddressLiteral.code(), "E001");
        assert_eq!(ErrorCode::PointerTableOutOfRange.code(), "E010");
        assert_eq!(ErrorCode::OffsetOutOfRange.code(), "E012");
        assert_eq!(ErrorCode::Io.code(), "E100");
    }

    #[test]
    fn test_display_includes_code() {
        let error = ToolError::new(ErrorCode::UnsupportedHexWidth, "value too wide");
        assert_eq!(error.to_string(), "[E002] value too wide");
    }

    #[test]
    fn test_format_error_with_hint() {
        let error = ToolError::new(ErrorCode::InvalidPointerWidth, "pointer width 5")
            .with_hint("use 2 or 3");

        let text = format_error(&error);
        assert!(text.starts_with("error[E004]: pointer width 5\n"));
        assert!(text.contains("= hint: use 2 or 3"));
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = ToolError::io(Path::new("game.sfc"), err);
        assert_eq!(error.code, ErrorCode::Io);
        assert!(error.message.contains("game.sfc"));
    }
}
