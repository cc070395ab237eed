//! Value-level outcome of a REST call.
//!
//! Every call returns an [`ApiResult`]: either a success holding the payload,
//! or a failure holding exactly one [`ApiError`]. Expected failures (network,
//! HTTP status, service error envelope) are values, never panics.
//!
//! The result is tagged by a [`ResultKind`] describing the call shape. All
//! kinds share the failure side; they only differ by the name of the payload
//! accessor:
//!
//! | Alias               | Kind          | Accessor      |
//! |---------------------|---------------|---------------|
//! | [`RetrieveResult`]  | [`Retrieve`]  | `entity()`    |
//! | [`CreateResult`]    | [`Create`]    | `created()`   |
//! | [`ModifyResult`]    | [`Modify`]    | `modified()`  |
//! | [`DeleteResult`]    | [`Delete`]    | `deleted()`   |
//! | [`OperationResult`] | [`Operation`] | -             |
//!
//! ```rust
//! use http::StatusCode;
//! use tyrest_core::{ApiError, InvalidStateError, RetrieveResult};
//!
//! let found: RetrieveResult<u32> = 42.into();
//! assert_eq!(found.entity(), Ok(&42));
//!
//! let missing = RetrieveResult::<u32>::from_error(StatusCode::NOT_FOUND);
//! assert!(!missing.is_success());
//! assert_eq!(missing.entity(), Err(InvalidStateError::NoValue));
//! assert_eq!(missing.error(), Some(&ApiError::from_status(StatusCode::NOT_FOUND)));
//! ```

use std::fmt::{self, Debug};
use std::marker::PhantomData;

mod error;
pub use self::error::{ApiError, InvalidStateError, ServiceErrorPayload, UNKNOWN_ERROR};

mod kind;
pub use self::kind::{Create, Delete, Modify, Operation, ResultKind, Retrieve};

/// Result of reading an entity.
pub type RetrieveResult<T> = ApiResult<T, Retrieve>;

/// Result of a write returning the created entity.
pub type CreateResult<T> = ApiResult<T, Create>;

/// Result of an update returning the modified entity.
pub type ModifyResult<T> = ApiResult<T, Modify>;

/// Result of a removal returning the deleted entity.
pub type DeleteResult<T> = ApiResult<T, Delete>;

/// Result of a call without payload.
pub type OperationResult = ApiResult<(), Operation>;

#[derive(Clone, PartialEq)]
enum Outcome<T> {
    Success(T),
    Failure(ApiError),
}

/// Outcome of a REST call: a payload of type `T`, or an [`ApiError`].
///
/// Exactly one of value and error is present, and a result never changes once built.
/// Check [`is_success`](Self::is_success) before reading the payload: reading
/// the value of a failed result returns [`InvalidStateError::NoValue`].
#[derive(Clone, PartialEq)]
pub struct ApiResult<T, K = Retrieve> {
    outcome: Outcome<T>,
    kind: PhantomData<K>,
}

impl<T, K> ApiResult<T, K> {
    /// Creates a successful result.
    pub fn from_success(value: T) -> Self {
        Self {
            outcome: Outcome::Success(value),
            kind: PhantomData,
        }
    }

    /// Creates a failed result.
    ///
    /// The error source may be an [`ApiError`], a [`ClientError`](crate::ClientError),
    /// a status code, a `(reason, status)` pair, or a `(status, ServiceErrorPayload)` pair.
    pub fn from_error(error: impl Into<ApiError>) -> Self {
        Self {
            outcome: Outcome::Failure(error.into()),
            kind: PhantomData,
        }
    }

    /// Returns `true` if the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }

    /// Returns `true` if the call failed, an [`ApiError`] is then available.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The payload of a successful result.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoValue`] if the result is a failure.
    pub fn value(&self) -> Result<&T, InvalidStateError> {
        match &self.outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(_) => Err(InvalidStateError::NoValue),
        }
    }

    /// Consumes the result and returns its payload.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoValue`] if the result is a failure.
    pub fn into_value(self) -> Result<T, InvalidStateError> {
        match self.outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(_) => Err(InvalidStateError::NoValue),
        }
    }

    /// The error of a failed result, `None` on success.
    pub fn error(&self) -> Option<&ApiError> {
        match &self.outcome {
            Outcome::Success(_) => None,
            Outcome::Failure(error) => Some(error),
        }
    }

    /// Consumes the result and returns its error.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoError`] if the result is a success.
    pub fn into_error(self) -> Result<ApiError, InvalidStateError> {
        match self.outcome {
            Outcome::Success(_) => Err(InvalidStateError::NoError),
            Outcome::Failure(error) => Ok(error),
        }
    }

    /// Converts into a standard [`Result`], for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed result.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    /// Borrows as a standard [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] of a failed result.
    pub fn as_result(&self) -> Result<&T, &ApiError> {
        match &self.outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(error) => Err(error),
        }
    }

    /// Maps the payload of a successful result, failures pass through unchanged.
    pub fn map<U>(self, mapper: impl FnOnce(T) -> U) -> ApiResult<U, K> {
        match self.outcome {
            Outcome::Success(value) => ApiResult::from_success(mapper(value)),
            Outcome::Failure(error) => ApiResult::from_error(error),
        }
    }

    /// Re-tags the result with another kind, keeping the payload or the error as is.
    pub fn retag<K2>(self) -> ApiResult<T, K2> {
        ApiResult {
            outcome: self.outcome,
            kind: PhantomData,
        }
    }

    /// Drops the payload, keeping only success or failure.
    pub fn into_operation(self) -> OperationResult {
        self.map(|_| ()).retag()
    }
}

impl<T, K> Debug for ApiResult<T, K>
where
    T: Debug,
    K: ResultKind,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Success(value) => formatter
                .debug_struct("Success")
                .field("kind", &K::NAME)
                .field("value", value)
                .finish(),
            Outcome::Failure(error) => formatter
                .debug_struct("Failure")
                .field("kind", &K::NAME)
                .field("error", error)
                .finish(),
        }
    }
}

impl<T, K> From<T> for ApiResult<T, K> {
    fn from(value: T) -> Self {
        Self::from_success(value)
    }
}

impl<T> ApiResult<T, Retrieve> {
    /// The retrieved entity.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoValue`] if the result is a failure.
    pub fn entity(&self) -> Result<&T, InvalidStateError> {
        self.value()
    }
}

impl<T> ApiResult<T, Create> {
    /// The created entity, as returned by the service.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoValue`] if the result is a failure.
    pub fn created(&self) -> Result<&T, InvalidStateError> {
        self.value()
    }
}

impl<T> ApiResult<T, Modify> {
    /// The modified entity, as returned by the service.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoValue`] if the result is a failure.
    pub fn modified(&self) -> Result<&T, InvalidStateError> {
        self.value()
    }
}

impl<T> ApiResult<T, Delete> {
    /// The deleted entity, as returned by the service.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::NoValue`] if the result is a failure.
    pub fn deleted(&self) -> Result<&T, InvalidStateError> {
        self.value()
    }
}

impl OperationResult {
    /// A successful operation.
    pub fn ok() -> Self {
        Self::from_success(())
    }
}
