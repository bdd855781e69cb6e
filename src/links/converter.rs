//! The converter entry point
//!
//! [`LinksConverter`] bundles the ambient naming convention with the type
//! registry. It is immutable once configured and can be shared across
//! threads behind an `Arc`.

use crate::config::ConverterConfig;
use crate::core::error::HalError;
use crate::core::naming::{NamingConvention, NamingStrategy};
use crate::links::descriptor::HalLinks;
use crate::links::reader::LinksReader;
use crate::links::registry::{AnyLinks, LinksRegistry};
use crate::links::writer::LinksWriter;
use serde_json::{Map, Value};
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Bidirectional converter between link collections and JSON
pub struct LinksConverter {
    naming: Arc<dyn NamingConvention>,
    registry: LinksRegistry,
}

impl Default for LinksConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl LinksConverter {
    /// Converter using identifiers unchanged as relation names
    pub fn new() -> Self {
        Self::with_naming(NamingStrategy::Identity)
    }

    pub fn with_naming(naming: impl NamingConvention + 'static) -> Self {
        Self {
            naming: Arc::new(naming),
            registry: LinksRegistry::new(),
        }
    }

    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::with_naming(config.naming)
    }

    /// Register a link collection type for runtime dispatch
    pub fn register<T: HalLinks>(&mut self) -> &mut Self {
        self.registry.register::<T>();
        self
    }

    pub fn naming(&self) -> &dyn NamingConvention {
        self.naming.as_ref()
    }

    pub fn registry(&self) -> &LinksRegistry {
        &self.registry
    }

    /// True only for types passed to [`register`](Self::register)
    pub fn can_convert(&self, type_id: TypeId) -> bool {
        self.registry.can_convert(type_id)
    }

    pub fn can_convert_type<T: 'static>(&self) -> bool {
        self.registry.can_convert_type::<T>()
    }

    // === Typed conversion ===

    pub fn write<T: HalLinks>(&self, links: &T) -> Result<Map<String, Value>, HalError> {
        LinksWriter::new(self.naming()).write(links)
    }

    pub fn to_value<T: HalLinks>(&self, links: &T) -> Result<Value, HalError> {
        self.write(links).map(Value::Object)
    }

    pub fn write_string<T: HalLinks>(&self, links: &T) -> Result<String, HalError> {
        Ok(serde_json::to_string(&self.to_value(links)?)?)
    }

    pub fn read<T: HalLinks>(&self, value: &Value) -> Result<T, HalError> {
        LinksReader::new(self.naming()).read(value)
    }

    pub fn read_str<T: HalLinks>(&self, json: &str) -> Result<T, HalError> {
        let value: Value = serde_json::from_str(json)?;
        self.read(&value)
    }

    // === Runtime dispatch ===

    /// Write a value of any registered type; `None` if it is not registered
    pub fn write_any(&self, value: &dyn Any) -> Option<Result<Map<String, Value>, HalError>> {
        self.registry.write_any(value, self.naming())
    }

    /// Read into the registered type `type_id`; `None` if it is not registered
    pub fn read_any(&self, type_id: TypeId, value: &Value) -> Option<Result<AnyLinks, HalError>> {
        self.registry.read_any(type_id, value, self.naming())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::link::HalLink;
    use crate::links::descriptor::{ConstructorCandidate, LinksDescriptor, RelationField};
    use serde_json::json;
    use std::sync::OnceLock;

    #[derive(Debug, Default, PartialEq)]
    struct PageLinks {
        next_page: Option<HalLink>,
    }

    impl HalLinks for PageLinks {
        fn descriptor() -> &'static LinksDescriptor<Self> {
            static DESCRIPTOR: OnceLock<LinksDescriptor<PageLinks>> = OnceLock::new();
            DESCRIPTOR.get_or_init(|| {
                LinksDescriptor::builder("PageLinks")
                    .field(
                        RelationField::optional("next_page", |l: &PageLinks| &l.next_page)
                            .writable(|l: &mut PageLinks, v| l.next_page = v),
                    )
                    .constructor(ConstructorCandidate::nullary(PageLinks::default))
                    .build()
            })
        }
    }

    #[test]
    fn test_default_converter_uses_identifiers() {
        let converter = LinksConverter::default();
        let links = PageLinks {
            next_page: Some(HalLink::new("/p/2")),
        };

        assert_eq!(
            converter.to_value(&links).unwrap(),
            json!({ "next_page": { "href": "/p/2" } })
        );
    }

    #[test]
    fn test_naming_convention_applies_both_ways() {
        let converter = LinksConverter::with_naming(NamingStrategy::CamelCase);
        let links = PageLinks {
            next_page: Some(HalLink::new("/p/2")),
        };

        let text = converter.write_string(&links).unwrap();
        assert_eq!(text, r#"{"nextPage":{"href":"/p/2"}}"#);

        let back: PageLinks = converter.read_str(&text).unwrap();
        assert_eq!(back, links);
    }

    #[test]
    fn test_from_config() {
        let config = ConverterConfig {
            naming: NamingStrategy::KebabCase,
        };
        let converter = LinksConverter::from_config(&config);

        assert_eq!(converter.naming().relation_name("next_page"), "next-page");
    }

    #[test]
    fn test_invalid_text_is_json_error() {
        let converter = LinksConverter::new();
        let err = converter.read_str::<PageLinks>("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_JSON");
    }

    #[test]
    fn test_registration_gates_runtime_dispatch() {
        let mut converter = LinksConverter::new();
        assert!(!converter.can_convert_type::<PageLinks>());
        assert!(converter.write_any(&PageLinks::default()).is_none());

        converter.register::<PageLinks>();
        assert!(converter.can_convert(TypeId::of::<PageLinks>()));
        assert_eq!(
            Value::Object(converter.write_any(&PageLinks::default()).unwrap().unwrap()),
            json!({})
        );
    }
}
