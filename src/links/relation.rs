//! Relation name resolution

use crate::core::naming::NamingConvention;

/// Wire relation name for a field
///
/// An explicit override always wins; otherwise the naming convention derives
/// the name from the field identifier.
///
/// ```
/// use halite::core::naming::NamingStrategy;
/// use halite::links::relation::resolve;
///
/// assert_eq!(resolve("self_link", Some("self"), &NamingStrategy::CamelCase), "self");
/// assert_eq!(resolve("next_page", None, &NamingStrategy::CamelCase), "nextPage");
/// ```
pub fn resolve(
    identifier: &str,
    relation_override: Option<&str>,
    naming: &dyn NamingConvention,
) -> String {
    match relation_override {
        Some(relation) => relation.to_string(),
        None => naming.relation_name(identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::naming::NamingStrategy;

    #[test]
    fn test_override_ignores_convention() {
        assert_eq!(resolve("This", Some("this"), &NamingStrategy::Identity), "this");
        assert_eq!(resolve("This", Some("This"), &NamingStrategy::LowerCase), "This");
    }

    #[test]
    fn test_convention_applies_without_override() {
        assert_eq!(resolve("Those", None, &NamingStrategy::Identity), "Those");
        assert_eq!(resolve("Those", None, &NamingStrategy::CamelCase), "those");
    }
}
