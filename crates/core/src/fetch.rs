//! Explicit state of an asynchronous request issued by the UI shell.

use crate::ErrorKind;

/// Lifecycle of a single request.
///
/// Replaces separate `loading` / `error` / `data` flags, which allowed
/// contradictory combinations such as "loading with an error".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Failure(ErrorKind),
}

impl<T> FetchState<T> {
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<ErrorKind>,
    {
        match result {
            Ok(value) => FetchState::Success(value),
            Err(err) => FetchState::Failure(err.into()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            FetchState::Failure(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Idle => FetchState::Idle,
            FetchState::Loading => FetchState::Loading,
            FetchState::Success(value) => FetchState::Success(f(value)),
            FetchState::Failure(kind) => FetchState::Failure(kind),
        }
    }
}
