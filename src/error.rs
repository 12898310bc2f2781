use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised on the control side before anything reaches the audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The message ring is full; the audio thread has not caught up.
    QueueFull,
    /// Pluck for a string the current tuning does not have.
    StringOutOfRange { string: usize, strings: usize },
    /// A parameter outside the range the engine can render.
    InvalidParameter { name: &'static str, value: f32 },
    TooManyStrings { requested: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::QueueFull => write!(f, "message queue is full"),
            Error::StringOutOfRange { string, strings } => {
                write!(f, "string {string} out of range for {strings} strings")
            }
            Error::InvalidParameter { name, value } => {
                write!(f, "invalid value {value} for parameter `{name}`")
            }
            Error::TooManyStrings { requested, max } => {
                write!(f, "{requested} strings requested, at most {max} supported")
            }
        }
    }
}

impl std::error::Error for Error {}
