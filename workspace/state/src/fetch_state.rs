use crate::error::FetchError;

/// State of one orchestrated fetch group. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            Self::Loading => FetchState::Loading,
            Self::Ready(data) => FetchState::Ready(f(data)),
            Self::Failed(err) => FetchState::Failed(err),
        }
    }
}

impl<T> From<Result<T, FetchError>> for FetchState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(err) => Self::Failed(err),
        }
    }
}
