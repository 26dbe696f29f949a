use crate::common::BackendError;

/// Outcome of one read issued by a view.
///
/// A failed read is kept distinct from an empty result so the page can show
/// an error with a retry link instead of "nothing here".
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    Ready(T),
    Failed(String),
}

impl<T> Loaded<T> {
    pub fn from_result(result: Result<T, BackendError>, what: &str) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                log::error!("Failed to load {}: {}", what, e);
                Self::Failed(format!("We couldn't load {what} right now."))
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Failed(msg) => Some(msg),
        }
    }
}

impl<T: Default> Loaded<T> {
    /// The loaded value, or an empty one when the read failed.
    pub fn into_value(self) -> T {
        match self {
            Self::Ready(v) => v,
            Self::Failed(_) => T::default(),
        }
    }
}
