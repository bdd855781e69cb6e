//! Core module containing the link value types, naming conventions and errors

pub mod error;
pub mod link;
pub mod naming;
pub mod uri;

pub use error::{ConstructorFault, HalError, ResolutionFailure};
pub use link::HalLink;
pub use naming::{NamingConvention, NamingStrategy};
pub use uri::UriRef;
