use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SatinResult<T> = Result<T, SatinError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatinErrorCategory {
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl SatinErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }
}

/// Fatal error raised anywhere in a batch run.
///
/// `code` is a stable dotted identifier (`IO.REPORT_OPEN`) that scripts can
/// match on; `message` is free text for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatinError {
    category: SatinErrorCategory,
    code: &'static str,
    message: String,
}

impl SatinError {
    pub fn new(
        category: SatinErrorCategory,
        code: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(SatinErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(SatinErrorCategory::IoSystemError, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(SatinErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> SatinErrorCategory {
        self.category
    }

    pub const fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.code, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for SatinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

impl Error for SatinError {}
