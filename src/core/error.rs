//! Typed error handling for the halite converter
//!
//! Every fault raised while moving a link collection between its typed form
//! and a generic JSON object is reported as a [`HalError`]. Nothing is
//! retried or recovered locally; the enclosing serializer decides what to do
//! with the document.
//!
//! # Error Categories
//!
//! - [`HalError::Serialization`]: a field value failed to convert on write
//! - [`HalError::TypeMismatch`]: the reader was handed something other than an object
//! - [`HalError::ConstructorResolution`]: no usable constructor (see [`ResolutionFailure`])
//! - [`HalError::ConstructionInvocation`]: the selected constructor itself failed
//! - [`HalError::Assignment`]: a post-construction field could not be converted
//!
//! # Example
//!
//! ```rust,ignore
//! match converter.read::<OrderLinks>(&value) {
//!     Ok(links) => println!("self = {}", links.self_link.href),
//!     Err(HalError::ConstructorResolution { reason, .. }) => eprintln!("bad descriptor: {reason}"),
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// The main error type for link collection conversion
#[derive(Debug, Error)]
pub enum HalError {
    /// Writing failed while converting a field value
    #[error("Failed to serialize object of type {type_name}: {source}")]
    Serialization {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The reader input is not a JSON object
    #[error("Expected a JSON object for {type_name}, found {found}")]
    TypeMismatch {
        type_name: &'static str,
        found: &'static str,
    },

    /// No constructor could be determined for the type
    #[error(
        "Unable to find a constructor to use for type {type_name} ({reason}). A type should \
         either have a nullary constructor, exactly one constructor with parameters or a single \
         designated constructor."
    )]
    ConstructorResolution {
        type_name: &'static str,
        reason: ResolutionFailure,
    },

    /// The selected constructor failed; carries the real cause
    #[error("Constructor for {type_name} failed: {fault}")]
    ConstructionInvocation {
        type_name: &'static str,
        #[source]
        fault: ConstructorFault,
    },

    /// A field assigned after construction could not be converted
    #[error("Failed to assign field '{field}' of {type_name}: {source}")]
    Assignment {
        type_name: &'static str,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Raw JSON text could not be parsed at all
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl HalError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            HalError::Serialization { .. } => "SERIALIZATION_FAILURE",
            HalError::TypeMismatch { .. } => "TYPE_MISMATCH",
            HalError::ConstructorResolution { .. } => "CONSTRUCTOR_RESOLUTION",
            HalError::ConstructionInvocation { .. } => "CONSTRUCTION_INVOCATION",
            HalError::Assignment { .. } => "ASSIGNMENT_FAILURE",
            HalError::Json(_) => "INVALID_JSON",
        }
    }

    /// Name of the link collection type the error concerns, when known
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            HalError::Serialization { type_name, .. }
            | HalError::TypeMismatch { type_name, .. }
            | HalError::ConstructorResolution { type_name, .. }
            | HalError::ConstructionInvocation { type_name, .. }
            | HalError::Assignment { type_name, .. } => Some(type_name),
            HalError::Json(_) => None,
        }
    }
}

// =============================================================================
// Constructor Resolution
// =============================================================================

/// Why a constructor could not be resolved for a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// None of the selection rules produced a candidate
    NoConstructor,

    /// More than one candidate is marked as the designated constructor
    AmbiguousDesignated { count: usize },

    /// A constructor parameter has no backing relation field
    UnboundParameter { parameter: &'static str },
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFailure::NoConstructor => write!(f, "no constructor determinable"),
            ResolutionFailure::AmbiguousDesignated { count } => {
                write!(f, "{} constructors are marked as designated", count)
            }
            ResolutionFailure::UnboundParameter { parameter } => {
                write!(f, "parameter '{}' has no corresponding field", parameter)
            }
        }
    }
}

// =============================================================================
// Constructor Faults
// =============================================================================

/// Failure raised from inside a constructor's build function
#[derive(Debug, Error)]
pub enum ConstructorFault {
    /// A bound argument did not convert to the parameter's type
    #[error("argument '{parameter}' could not be converted: {source}")]
    Conversion {
        parameter: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The build function asked for a parameter it never declared
    #[error("parameter '{parameter}' is not declared by this constructor")]
    UndeclaredParameter { parameter: String },

    /// The build function rejected the assembled arguments
    #[error("{0}")]
    Rejected(String),
}

impl ConstructorFault {
    /// Reject construction with a message
    pub fn rejected(message: impl Into<String>) -> Self {
        ConstructorFault::Rejected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err()
    }

    #[test]
    fn test_error_codes() {
        let err = HalError::TypeMismatch {
            type_name: "OrderLinks",
            found: "array",
        };
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
        assert_eq!(err.type_name(), Some("OrderLinks"));

        let err = HalError::ConstructorResolution {
            type_name: "OrderLinks",
            reason: ResolutionFailure::NoConstructor,
        };
        assert_eq!(err.error_code(), "CONSTRUCTOR_RESOLUTION");

        assert_eq!(HalError::from(json_error()).error_code(), "INVALID_JSON");
        assert_eq!(HalError::from(json_error()).type_name(), None);
    }

    #[test]
    fn test_serialization_failure_names_type_and_keeps_cause() {
        let err = HalError::Serialization {
            type_name: "OrderLinks",
            source: json_error(),
        };
        assert!(err.to_string().contains("OrderLinks"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_resolution_failure_display() {
        assert_eq!(
            ResolutionFailure::NoConstructor.to_string(),
            "no constructor determinable"
        );
        assert_eq!(
            ResolutionFailure::AmbiguousDesignated { count: 2 }.to_string(),
            "2 constructors are marked as designated"
        );
        assert_eq!(
            ResolutionFailure::UnboundParameter { parameter: "those" }.to_string(),
            "parameter 'those' has no corresponding field"
        );
    }

    #[test]
    fn test_invocation_error_exposes_inner_fault() {
        let err = HalError::ConstructionInvocation {
            type_name: "OrderLinks",
            fault: ConstructorFault::rejected("self link is required"),
        };
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("self link is required".to_string())
        );
    }
}
