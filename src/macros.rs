//! Macros for reducing boilerplate when declaring link collections

/// Implement [`HalLinks`](crate::links::HalLinks) with a memoized descriptor
///
/// The descriptor expression is evaluated once, on first use.
///
/// # Example
///
/// ```rust
/// use halite::prelude::*;
///
/// #[derive(Debug, Default)]
/// pub struct OrderLinks {
///     pub self_link: Option<HalLink>,
///     pub items: Vec<HalLink>,
/// }
///
/// impl_hal_links!(
///     OrderLinks,
///     LinksDescriptor::builder("OrderLinks")
///         .field(RelationField::optional("self_link", |l: &OrderLinks| &l.self_link).rel("self"))
///         .field(RelationField::many("items", |l: &OrderLinks| &l.items))
///         .constructor(ConstructorCandidate::new(["self_link", "items"], |args| {
///             Ok(OrderLinks {
///                 self_link: args.arg("self_link")?,
///                 items: args.arg_or_default("items")?,
///             })
///         }))
///         .build()
/// );
///
/// assert_eq!(OrderLinks::descriptor().fields().len(), 2);
/// ```
#[macro_export]
macro_rules! impl_hal_links {
    ($type:ty, $descriptor:expr $(,)?) => {
        impl $crate::links::HalLinks for $type {
            fn descriptor() -> &'static $crate::links::LinksDescriptor<Self> {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::links::LinksDescriptor<$type>> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| $descriptor)
            }
        }
    };
}

/// Implement `serde::Serialize` and `serde::Deserialize` through the converter
///
/// Lets a link collection sit anywhere serde reaches, for instance under the
/// `_links` key of a resource body. The naming convention defaults to
/// [`NamingStrategy::Identity`](crate::core::naming::NamingStrategy).
///
/// ```rust,ignore
/// impl_hal_links_serde!(OrderLinks);
/// impl_hal_links_serde!(PageLinks, NamingStrategy::CamelCase);
/// ```
#[macro_export]
macro_rules! impl_hal_links_serde {
    ($type:ty) => {
        $crate::impl_hal_links_serde!($type, $crate::core::naming::NamingStrategy::Identity);
    };
    ($type:ty, $naming:expr) => {
        impl $crate::__serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                let naming = $naming;
                let object = $crate::links::LinksWriter::new(&naming)
                    .write(self)
                    .map_err(<S::Error as $crate::__serde::ser::Error>::custom)?;
                $crate::__serde::Serialize::serialize(&object, serializer)
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                let value = <$crate::__serde_json::Value as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                let naming = $naming;
                $crate::links::LinksReader::new(&naming)
                    .read(&value)
                    .map_err(<D::Error as $crate::__serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct MacroLinks {
        next_page: Option<HalLink>,
    }

    crate::impl_hal_links!(
        MacroLinks,
        LinksDescriptor::builder("MacroLinks")
            .field(
                RelationField::optional("next_page", |l: &MacroLinks| &l.next_page)
                    .writable(|l: &mut MacroLinks, v| l.next_page = v),
            )
            .constructor(ConstructorCandidate::nullary(MacroLinks::default))
            .build()
    );

    crate::impl_hal_links_serde!(MacroLinks, NamingStrategy::KebabCase);

    #[test]
    fn test_serde_impl_expands_through_crate_paths() {
        let links = MacroLinks {
            next_page: Some(HalLink::new("/p/2")),
        };

        let value = serde_json::to_value(&links).unwrap();
        assert_eq!(value, json!({ "next-page": { "href": "/p/2" } }));

        let back: MacroLinks = serde_json::from_value(value).unwrap();
        assert_eq!(back, links);
    }

    #[test]
    fn test_serde_impl_reports_reader_errors() {
        let err = serde_json::from_value::<MacroLinks>(json!("not an object")).unwrap_err();
        assert!(err.to_string().contains("MacroLinks"));
    }
}
