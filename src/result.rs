//! # Result Combinators
//!
//! `std::result::Result` already is the tagged success/failure union the engine
//! needs: `map`, `map_err` and `and_then` never run their callback on the
//! other variant, and `unwrap`/`unwrap_err` panic when the wrong side is
//! accessed. This module adds the few combinators std does not ship
//! (`fold`, `from_nullable`, side-effect taps) plus [`ResultCollection`]
//! for batch outcomes.

/// Build a success result
pub fn success<T, E>(value: T) -> Result<T, E> {
    Ok(value)
}

/// Build a failure result
pub fn failure<T, E>(error: E) -> Result<T, E> {
    Err(error)
}

/// Lift an optional value, failing with `error_if_null` when absent
pub fn from_nullable<T, E>(value: Option<T>, error_if_null: E) -> Result<T, E> {
    value.ok_or(error_if_null)
}

/// Extra combinators over `Result`
pub trait ResultExt<T, E>: Sized {
    fn is_success(&self) -> bool;

    fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Collapse into one value; exactly one callback runs
    fn fold<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(E) -> R) -> R;

    /// Success value or `default`
    fn get_value_or(self, default: T) -> T;

    /// Run a side effect on the success value and pass the result through
    fn on_success(self, callback: impl FnOnce(&T)) -> Self;

    /// Run a side effect on the error and pass the result through
    fn on_failure(self, callback: impl FnOnce(&E)) -> Self;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }

    fn fold<R>(self, on_success: impl FnOnce(T) -> R, on_failure: impl FnOnce(E) -> R) -> R {
        match self {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }

    fn get_value_or(self, default: T) -> T {
        self.unwrap_or(default)
    }

    fn on_success(self, callback: impl FnOnce(&T)) -> Self {
        if let Ok(value) = &self {
            callback(value);
        }
        self
    }

    fn on_failure(self, callback: impl FnOnce(&E)) -> Self {
        if let Err(error) = &self {
            callback(error);
        }
        self
    }
}

/// Ordered collection of results from a batch of operations
#[derive(Debug, Clone)]
pub struct ResultCollection<T, E> {
    results: Vec<Result<T, E>>,
}

impl<T, E> Default for ResultCollection<T, E> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

impl<T, E> ResultCollection<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, result: Result<T, E>) -> Self {
        self.results.push(result);
        self
    }

    pub fn push(&mut self, result: Result<T, E>) {
        self.results.push(result);
    }

    pub fn all_successful(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }

    pub fn any_successful(&self) -> bool {
        self.results.iter().any(Result::is_ok)
    }

    pub fn successes(&self) -> Vec<&T> {
        self.results.iter().filter_map(|r| r.as_ref().ok()).collect()
    }

    pub fn errors(&self) -> Vec<&E> {
        self.results.iter().filter_map(|r| r.as_ref().err()).collect()
    }

    /// All values when every result succeeded, otherwise every error
    pub fn combine(self) -> Result<Vec<T>, Vec<E>> {
        let (oks, errs): (Vec<_>, Vec<_>) = self.results.into_iter().partition(Result::is_ok);
        if errs.is_empty() {
            Ok(oks.into_iter().filter_map(Result::ok).collect())
        } else {
            Err(errs.into_iter().filter_map(Result::err).collect())
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Result<T, E>> {
        self.results.iter()
    }
}

impl<T, E> FromIterator<Result<T, E>> for ResultCollection<T, E> {
    fn from_iter<I: IntoIterator<Item = Result<T, E>>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl<T, E> IntoIterator for ResultCollection<T, E> {
    type Item = Result<T, E>;
    type IntoIter = std::vec::IntoIter<Result<T, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, PipelineError};
    use std::cell::Cell;

    #[test]
    fn test_from_nullable() {
        let present: Result<i32, &str> = from_nullable(Some(3), "missing");
        assert_eq!(present, Ok(3));

        let absent: Result<i32, &str> = from_nullable(None, "missing");
        assert_eq!(absent, Err("missing"));
        assert!(present.is_success());
        assert!(absent.is_failure());
    }

    #[test]
    fn test_map_and_flat_map_skip_failures() {
        let calls = Cell::new(0);
        let failed: Result<i32, PipelineError> = failure(PipelineError::internal("boom"));

        let mapped = failed
            .map(|v| {
                calls.set(calls.get() + 1);
                v * 2
            })
            .and_then(|v| {
                calls.set(calls.get() + 1);
                success::<i32, PipelineError>(v + 1)
            });

        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.unwrap_err().code(), ErrorCode::InternalError);
    }

    #[test]
    fn test_map_error_skips_success() {
        let called = Cell::new(false);
        let ok: Result<i32, &str> = success(5);
        let result = ok.map_err(|e| {
            called.set(true);
            e.len()
        });
        assert_eq!(result, Ok(5));
        assert!(!called.get());
    }

    #[test]
    fn test_fold_runs_exactly_one_branch() {
        let ok: Result<i32, &str> = success(2);
        assert_eq!(ok.fold(|v| v * 10, |_| -1), 20);

        let err: Result<i32, &str> = failure("nope");
        assert_eq!(err.fold(|v| v * 10, |e| e.len() as i32), 4);
    }

    #[test]
    fn test_get_value_or_and_taps() {
        let seen = Cell::new(0);
        let err: Result<i32, &str> = failure("bad");
        let value = err
            .on_success(|_| seen.set(1))
            .on_failure(|_| seen.set(2))
            .get_value_or(7);
        assert_eq!(value, 7);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    #[should_panic]
    fn test_wrong_side_access_is_fatal() {
        let ok: Result<i32, &str> = success(1);
        let _ = ok.unwrap_err();
    }

    #[test]
    fn test_collection_combine() {
        let all_ok: ResultCollection<i32, &str> = vec![Ok(1), Ok(2)].into_iter().collect();
        assert!(all_ok.all_successful());
        assert_eq!(all_ok.combine(), Ok(vec![1, 2]));

        let mixed = ResultCollection::new()
            .with(Ok(1))
            .with(Err("a"))
            .with(Err("b"));
        assert!(mixed.any_successful());
        assert!(!mixed.all_successful());
        assert_eq!(mixed.successes(), vec![&1]);
        assert_eq!(mixed.len(), 3);
        assert_eq!(mixed.combine(), Err(vec!["a", "b"]));
    }
}
