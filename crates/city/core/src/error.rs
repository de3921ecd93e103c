//! Common error infrastructure for city-core.
//!
//! Every fallible operation in the crate returns [`CityError`]. Variants are
//! grouped by [`ErrorSeverity`] so callers can decide whether a failure is an
//! expected shortfall (retry later, skip this building) or a rejected input.
//!
//! # Design Principles
//!
//! - **Single taxonomy**: resource, funds, limit and input failures share one enum
//! - **Stable codes**: [`CityError::error_code`] never changes with message wording
//! - **Severity Classification**: bulk passes only swallow recoverable errors

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same request may succeed once the city has
    /// more resources or money.
    ///
    /// Examples: insufficient wood, not enough money for an upgrade
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown building type, malformed scenario file
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors produced by the city simulation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CityError {
    /// No constructor is registered under this type id.
    #[error("unknown building type: {0}")]
    UnknownType(String),

    /// Attempted to add a negative quantity to a resource pool.
    #[error("negative quantity for resource '{resource}' is not allowed")]
    NegativeQuantity { resource: String },

    /// A total would exceed the largest value its ledger can hold.
    #[error("quantity overflow for '{resource}'")]
    QuantityOverflow { resource: String },

    /// A resource pool holds less than a required quantity.
    #[error("insufficient resource: {0}")]
    InsufficientResource(String),

    /// Not enough money to pay a cost.
    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    /// The city has no free building slots left.
    #[error("building limit exceeded (max {max})")]
    LimitExceeded { max: usize },

    /// Malformed scenario input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A positional building parameter could not be parsed.
    #[error("invalid parameter #{index} for '{type_id}': '{value}'")]
    InvalidParameter {
        type_id: String,
        index: usize,
        value: String,
    },

    /// Parsed values violate a building invariant.
    #[error("invalid building: {0}")]
    InvalidBuilding(String),

    /// Operation requires an occupied slot.
    #[error("no building in slot")]
    EmptySlot,
}

impl CityError {
    /// Returns the severity level of this error.
    pub fn severity(&self) -> ErrorSeverity {
        use CityError::*;
        match self {
            InsufficientResource(_) | InsufficientFunds { .. } => ErrorSeverity::Recoverable,
            UnknownType(_)
            | NegativeQuantity { .. }
            | QuantityOverflow { .. }
            | LimitExceeded { .. }
            | InvalidInput(_)
            | InvalidParameter { .. }
            | InvalidBuilding(_)
            | EmptySlot => ErrorSeverity::Validation,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        use CityError::*;
        match self {
            UnknownType(_) => "CITY_UNKNOWN_TYPE",
            NegativeQuantity { .. } => "CITY_NEGATIVE_QUANTITY",
            QuantityOverflow { .. } => "CITY_QUANTITY_OVERFLOW",
            InsufficientResource(_) => "CITY_INSUFFICIENT_RESOURCE",
            InsufficientFunds { .. } => "CITY_INSUFFICIENT_FUNDS",
            LimitExceeded { .. } => "CITY_LIMIT_EXCEEDED",
            InvalidInput(_) => "CITY_INVALID_INPUT",
            InvalidParameter { .. } => "CITY_INVALID_PARAMETER",
            InvalidBuilding(_) => "CITY_INVALID_BUILDING",
            EmptySlot => "CITY_EMPTY_SLOT",
        }
    }

    /// Shorthand for the funds check shared by every money cost.
    pub(crate) fn funds(needed: i64, available: i64) -> Self {
        Self::InsufficientFunds { needed, available }
    }

    pub(crate) fn overflow(resource: &str) -> Self {
        Self::QuantityOverflow {
            resource: resource.to_string(),
        }
    }
}

/// Result alias used throughout city-core.
pub type CityResult<T> = Result<T, CityError>;
