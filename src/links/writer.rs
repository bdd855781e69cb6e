//! Typed link collection to generic JSON

use crate::core::error::HalError;
use crate::core::naming::NamingConvention;
use crate::links::descriptor::{HalLinks, LinksDescriptor};
use serde_json::{Map, Value};

/// Serializes link collections into JSON objects keyed by relation name
pub struct LinksWriter<'a> {
    naming: &'a dyn NamingConvention,
}

impl<'a> LinksWriter<'a> {
    pub fn new(naming: &'a dyn NamingConvention) -> Self {
        Self { naming }
    }

    pub fn write<T: HalLinks>(&self, instance: &T) -> Result<Map<String, Value>, HalError> {
        self.write_with(T::descriptor(), instance)
    }

    /// Write an instance using an explicit descriptor
    ///
    /// Readable fields are emitted in descriptor order. Fields whose value
    /// converts to `null` are left out entirely.
    pub fn write_with<T>(
        &self,
        descriptor: &LinksDescriptor<T>,
        instance: &T,
    ) -> Result<Map<String, Value>, HalError> {
        let type_name = descriptor.type_name();
        tracing::debug!(target_type = type_name, "writing link collection");

        let mut object = Map::new();
        for field in descriptor.fields() {
            let Some(value) = field.read_value(instance) else {
                continue;
            };
            let value = value.map_err(|source| HalError::Serialization { type_name, source })?;

            if value.is_null() {
                tracing::trace!(field = field.identifier(), "omitting null relation");
                continue;
            }

            let relation = field.relation_name(self.naming);
            tracing::trace!(field = field.identifier(), relation = %relation, "writing relation");
            object.insert(relation, value);
        }

        Ok(object)
    }
}
