//! Type-directed registry of link collection converters
//!
//! The surrounding serializer only knows the runtime type of the value in
//! hand. The registry maps that type to the converter for its link
//! collection, and answers whether a type is convertible at all.

use crate::core::error::HalError;
use crate::core::naming::NamingConvention;
use crate::links::descriptor::HalLinks;
use crate::links::reader::LinksReader;
use crate::links::writer::LinksWriter;
use serde_json::{Map, Value};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Boxed result of a type-erased read
pub type AnyLinks = Box<dyn Any + Send + Sync>;

/// Converter for one link collection type, with the type erased
trait ErasedConverter: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn write(
        &self,
        value: &dyn Any,
        naming: &dyn NamingConvention,
    ) -> Option<Result<Map<String, Value>, HalError>>;

    fn read(&self, value: &Value, naming: &dyn NamingConvention) -> Result<AnyLinks, HalError>;
}

struct Registration<T>(PhantomData<fn() -> T>);

impl<T: HalLinks> ErasedConverter for Registration<T> {
    fn type_name(&self) -> &'static str {
        T::descriptor().type_name()
    }

    fn write(
        &self,
        value: &dyn Any,
        naming: &dyn NamingConvention,
    ) -> Option<Result<Map<String, Value>, HalError>> {
        let instance = value.downcast_ref::<T>()?;
        Some(LinksWriter::new(naming).write(instance))
    }

    fn read(&self, value: &Value, naming: &dyn NamingConvention) -> Result<AnyLinks, HalError> {
        let instance: T = LinksReader::new(naming).read(value)?;
        Ok(Box::new(instance))
    }
}

/// Registry of convertible link collection types, keyed by `TypeId`
#[derive(Default)]
pub struct LinksRegistry {
    converters: HashMap<TypeId, Box<dyn ErasedConverter>>,
}

impl LinksRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Register a link collection type
    ///
    /// Registering the same type twice replaces the earlier entry.
    pub fn register<T: HalLinks>(&mut self) {
        tracing::debug!(target_type = T::descriptor().type_name(), "registering link collection");
        self.converters
            .insert(TypeId::of::<T>(), Box::new(Registration::<T>(PhantomData)));
    }

    /// Whether values of this runtime type are handled by the registry
    ///
    /// Only registered types answer true. A type that implements
    /// [`HalLinks`] but has not gone through [`register`](Self::register)
    /// answers false, since the registry has no converter for it yet.
    pub fn can_convert(&self, type_id: TypeId) -> bool {
        self.converters.contains_key(&type_id)
    }

    /// Typed form of [`can_convert`](Self::can_convert)
    pub fn can_convert_type<T: 'static>(&self) -> bool {
        self.can_convert(TypeId::of::<T>())
    }

    /// Names of all registered types, sorted
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.converters.values().map(|c| c.type_name()).collect();
        names.sort_unstable();
        names
    }

    /// Write a value whose concrete type is only known at runtime
    ///
    /// Returns `None` when the type is not registered.
    pub fn write_any(
        &self,
        value: &dyn Any,
        naming: &dyn NamingConvention,
    ) -> Option<Result<Map<String, Value>, HalError>> {
        self.converters.get(&value.type_id())?.write(value, naming)
    }

    /// Read into the registered type identified by `type_id`
    ///
    /// Returns `None` when the type is not registered.
    pub fn read_any(
        &self,
        type_id: TypeId,
        value: &Value,
        naming: &dyn NamingConvention,
    ) -> Option<Result<AnyLinks, HalError>> {
        self.converters
            .get(&type_id)
            .map(|converter| converter.read(value, naming))
    }
}
