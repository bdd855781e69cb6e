//! Constructor selection for deserialization

use crate::core::error::{HalError, ResolutionFailure};
use crate::links::descriptor::{ConstructorCandidate, LinksDescriptor};

/// Pick the constructor used to build an instance from wire data
///
/// Rules, first match wins:
/// 1. the single designated constructor (more than one is an error, even
///    when a later rule would succeed)
/// 2. the single nullary constructor
/// 3. the only constructor the type has
pub fn select<T>(descriptor: &LinksDescriptor<T>) -> Result<&ConstructorCandidate<T>, HalError> {
    let constructors = descriptor.constructors();
    let fail = |reason| HalError::ConstructorResolution {
        type_name: descriptor.type_name(),
        reason,
    };

    let designated: Vec<_> = constructors.iter().filter(|c| c.is_designated()).collect();
    match designated.as_slice() {
        [only] => return Ok(*only),
        [] => {}
        many => {
            return Err(fail(ResolutionFailure::AmbiguousDesignated { count: many.len() }));
        }
    }

    let mut nullary = constructors.iter().filter(|c| c.parameters().is_empty());
    if let (Some(only), None) = (nullary.next(), nullary.next()) {
        return Ok(only);
    }

    match constructors {
        [only] => Ok(only),
        _ => Err(fail(ResolutionFailure::NoConstructor)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::descriptor::LinksDescriptorBuilder;

    #[derive(Debug, Default, PartialEq)]
    struct Tagged(&'static str);

    fn builder() -> LinksDescriptorBuilder<Tagged> {
        LinksDescriptor::builder("Tagged")
    }

    fn with_params(tag: &'static str) -> ConstructorCandidate<Tagged> {
        ConstructorCandidate::new(["a", "b"], move |_| Ok(Tagged(tag)))
    }

    fn selected_tag(descriptor: &LinksDescriptor<Tagged>) -> &'static str {
        let candidate = select(descriptor).unwrap();
        let args = crate::links::descriptor::ConstructorArgs::default();
        candidate.invoke(&args).unwrap().0
    }

    #[test]
    fn test_designated_wins_over_nullary() {
        let descriptor = builder()
            .constructor(ConstructorCandidate::nullary(|| Tagged("nullary")))
            .constructor(ConstructorCandidate::nullary(|| Tagged("designated")).designated())
            .build();

        assert_eq!(selected_tag(&descriptor), "designated");
    }

    #[test]
    fn test_two_designated_is_ambiguous() {
        let descriptor = builder()
            .constructor(with_params("first").designated())
            .constructor(with_params("second").designated())
            .constructor(ConstructorCandidate::nullary(|| Tagged("nullary")))
            .build();

        let err = select(&descriptor).unwrap_err();
        assert!(matches!(
            err,
            HalError::ConstructorResolution {
                reason: ResolutionFailure::AmbiguousDesignated { count: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_single_nullary_among_many() {
        let descriptor = builder()
            .constructor(with_params("params"))
            .constructor(ConstructorCandidate::nullary(|| Tagged("nullary")))
            .build();

        assert_eq!(selected_tag(&descriptor), "nullary");
    }

    #[test]
    fn test_only_constructor_is_used() {
        let descriptor = builder().constructor(with_params("only")).build();

        assert_eq!(selected_tag(&descriptor), "only");
    }

    #[test]
    fn test_two_untagged_parameterized_fail() {
        let descriptor = builder()
            .constructor(with_params("first"))
            .constructor(with_params("second"))
            .build();

        let err = select(&descriptor).unwrap_err();
        assert!(matches!(
            err,
            HalError::ConstructorResolution {
                type_name: "Tagged",
                reason: ResolutionFailure::NoConstructor,
            }
        ));
    }

    #[test]
    fn test_no_constructors_fail() {
        let descriptor = builder().build();

        assert!(select(&descriptor).is_err());
    }
}
