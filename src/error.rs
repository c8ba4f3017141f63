use std::fmt;

/// Everything that can go wrong while turning text into a `Document`.
///
/// Decoders that only see a single token report `line: 0`; the document
/// assembler fills in the real line with [`ParseError::at_line`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A value token that is not a quoted string.
    InvalidString {
        text: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A value that starts with `[` but is not a list of quoted strings.
    InvalidArray {
        text: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A line that is neither a header nor an assignment.
    InvalidLine {
        text: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidKey {
        key: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Empty header or a path segment outside `[A-Za-z0-9_-]`.
    InvalidHeader {
        header: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// A path segment already holds a value of another shape.
    ShapeConflict {
        path: String,
        expected: &'static str,
        found: &'static str,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Input ended before a multi-line array was closed.
    UnterminatedArray {
        key: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidString { line, .. }
            | ParseError::InvalidArray { line, .. }
            | ParseError::InvalidLine { line, .. }
            | ParseError::InvalidKey { line, .. }
            | ParseError::InvalidHeader { line, .. }
            | ParseError::ShapeConflict { line, .. }
            | ParseError::UnterminatedArray { line, .. } => *line,
        }
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            ParseError::InvalidString { code, .. }
            | ParseError::InvalidArray { code, .. }
            | ParseError::InvalidLine { code, .. }
            | ParseError::InvalidKey { code, .. }
            | ParseError::InvalidHeader { code, .. }
            | ParseError::ShapeConflict { code, .. }
            | ParseError::UnterminatedArray { code, .. } => *code,
        }
    }

    /// Attach a source line, keeping any line that was already set.
    pub fn at_line(mut self, at: usize) -> Self {
        match &mut self {
            ParseError::InvalidString { line, .. }
            | ParseError::InvalidArray { line, .. }
            | ParseError::InvalidLine { line, .. }
            | ParseError::InvalidKey { line, .. }
            | ParseError::InvalidHeader { line, .. }
            | ParseError::ShapeConflict { line, .. }
            | ParseError::UnterminatedArray { line, .. } => {
                if *line == 0 {
                    *line = at;
                }
            }
        }
        self
    }
}

fn location(line: usize) -> String {
    if line > 0 {
        format!(" at line {}", line)
    } else {
        String::new()
    }
}

fn extras(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidString { text, line, hint, code } =>
                write!(f, "invalid string {:?}{}.{}", text, location(*line), extras(hint, code)),
            ParseError::InvalidArray { text, line, hint, code } =>
                write!(f, "invalid array {:?}{}.{}", text, location(*line), extras(hint, code)),
            ParseError::InvalidLine { text, line, hint, code } =>
                write!(f, "invalid line {:?}{}.{}", text, location(*line), extras(hint, code)),
            ParseError::InvalidKey { key, line, hint, code } =>
                write!(f, "invalid key {:?}{}.{}", key, location(*line), extras(hint, code)),
            ParseError::InvalidHeader { header, line, hint, code } =>
                write!(f, "invalid header {:?}{}.{}", header, location(*line), extras(hint, code)),
            ParseError::ShapeConflict { path, expected, found, line, hint, code } =>
                write!(f, "expected {} at {:?} but found {}{}.{}",
                    expected, path, found, location(*line), extras(hint, code)),
            ParseError::UnterminatedArray { key, line, hint, code } =>
                write!(f, "unterminated array for key {:?}{}.{}", key, location(*line), extras(hint, code)),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by the typed access layer and the tools built on it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(ParseError),
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    PathNotFound {
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    ValidationError {
        message: String,
        line: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised by the tools for missing fields, bad arguments and I/O setup.
    RuntimeError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl ConfigError {
    pub fn runtime(message: impl Into<String>) -> Self {
        ConfigError::RuntimeError {
            message: message.into(),
            hint: None,
            code: None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "{}", e),
            ConfigError::FileError { message, path, hint, code } =>
                write!(f, "{} '{}'.{}", message, path, extras(hint, code)),
            ConfigError::PathNotFound { path, hint, code } =>
                write!(f, "path '{}' not found.{}", path, extras(hint, code)),
            ConfigError::TypeError { message, line, hint, code } =>
                write!(f, "{}{}.{}", message, location(*line), extras(hint, code)),
            ConfigError::ValidationError { message, line, hint, code } =>
                write!(f, "{}{}.{}", message, location(*line), extras(hint, code)),
            ConfigError::RuntimeError { message, hint, code } =>
                write!(f, "{}{}", message, extras(hint, code)),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}
