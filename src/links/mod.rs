//! Link collection conversion
//!
//! Descriptors state the shape of each link collection type; the writer and
//! reader move instances between that typed form and a JSON object keyed by
//! relation name.

pub mod constructor;
pub mod converter;
pub mod descriptor;
pub mod reader;
pub mod registry;
pub mod relation;
pub mod writer;

pub use converter::LinksConverter;
pub use descriptor::{
    ConstructorArgs, ConstructorCandidate, HalLinks, LinksDescriptor, LinksDescriptorBuilder,
    RelationField, ValueShape,
};
pub use reader::LinksReader;
pub use registry::{AnyLinks, LinksRegistry};
pub use writer::LinksWriter;
