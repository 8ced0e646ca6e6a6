use std::error::Error;
use std::fmt::{Display, Formatter};

pub type IbeiResult<T> = Result<T, IbeiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IbeiErrorCategory {
    Success,
    ExpectationMismatch,
    InputValidationError,
    IoSystemError,
    InternalError,
}

impl IbeiErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::ExpectationMismatch => 1,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::ExpectationMismatch => "ExpectationMismatch",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbeiError {
    category: IbeiErrorCategory,
    code: &'static str,
    message: String,
}

impl IbeiError {
    pub fn new(category: IbeiErrorCategory, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            category,
            code,
            message: message.into(),
        }
    }

    pub fn input_validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(IbeiErrorCategory::InputValidationError, code, message)
    }

    pub fn io_system(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(IbeiErrorCategory::IoSystemError, code, message)
    }

    pub fn expectation_mismatch(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(IbeiErrorCategory::ExpectationMismatch, code, message)
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(IbeiErrorCategory::InternalError, code, message)
    }

    pub const fn category(&self) -> IbeiErrorCategory {
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
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.code, self.message)
    }
}

impl Display for IbeiError {
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

impl Error for IbeiError {}
