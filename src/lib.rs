//! # Halite
//!
//! Typed HAL link collections and the converter that moves them to and from
//! the `_links` section of a HAL document.
//!
//! ## Features
//!
//! - **Descriptor-Driven**: each link collection states its relation fields and constructors once
//! - **Relation Names**: explicit overrides, or a naming convention applied to the identifier
//! - **Constructor Selection**: designated, nullary or sole constructor, in that order
//! - **Null Omission**: absent relations are never written as `null`
//! - **Case-Insensitive Reads**: `self`, `SELF` and `sElF` all bind the same relation
//! - **Serde Integration**: link collections nest inside any serde-serialized body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use halite::prelude::*;
//!
//! #[derive(Debug)]
//! pub struct OrderLinks {
//!     pub self_link: HalLink,
//!     pub items: Vec<HalLink>,
//! }
//!
//! impl_hal_links!(
//!     OrderLinks,
//!     LinksDescriptor::builder("OrderLinks")
//!         .field(RelationField::single("self_link", |l: &OrderLinks| &l.self_link).rel("self"))
//!         .field(RelationField::many("items", |l: &OrderLinks| &l.items))
//!         .constructor(ConstructorCandidate::new(["self_link", "items"], |args| {
//!             Ok(OrderLinks {
//!                 self_link: args.arg("self_link")?,
//!                 items: args.arg_or_default("items")?,
//!             })
//!         }))
//!         .build()
//! );
//!
//! let converter = LinksConverter::new();
//! let links: OrderLinks = converter.read_str(r#"{"self":{"href":"/orders/1"}}"#)?;
//! let json = converter.to_value(&links)?;
//! ```

pub mod config;
pub mod core;
pub mod links;
mod macros;

// Paths used by the exported macros, so callers need no direct dependency
#[doc(hidden)]
pub use serde as __serde;
#[doc(hidden)]
pub use serde_json as __serde_json;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ConstructorFault, HalError, ResolutionFailure},
        link::HalLink,
        naming::{NamingConvention, NamingStrategy},
        uri::UriRef,
    };

    // === Descriptors ===
    pub use crate::links::{
        ConstructorArgs, ConstructorCandidate, HalLinks, LinksDescriptor, RelationField,
        ValueShape,
    };

    // === Conversion ===
    pub use crate::links::{LinksConverter, LinksReader, LinksRegistry, LinksWriter};

    // === Config ===
    pub use crate::config::ConverterConfig;

    // === Macros ===
    pub use crate::{impl_hal_links, impl_hal_links_serde};
}
