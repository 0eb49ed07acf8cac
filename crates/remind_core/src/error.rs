use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    NotFound(String),
    MalformedData(String),
    InvalidArgument(String),
    Io(String),
}

impl AppError {
    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::NotFound(message.into())
    }

    pub fn malformed_data<M: Into<String>>(message: M) -> Self {
        Self::MalformedData(message.into())
    }

    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MalformedData(_) => "malformed_data",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(message) => message,
            Self::MalformedData(message) => message,
            Self::InvalidArgument(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
