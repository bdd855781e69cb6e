//! Generic JSON to typed link collection

use crate::core::error::{HalError, ResolutionFailure};
use crate::core::naming::NamingConvention;
use crate::links::constructor;
use crate::links::descriptor::{
    ConstructorArgs, HalLinks, LinksDescriptor, RelationField, ValueShape, fold_case,
};
use serde_json::{Map, Value};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Parses JSON objects keyed by relation name into link collections
pub struct LinksReader<'a> {
    naming: &'a dyn NamingConvention,
}

impl<'a> LinksReader<'a> {
    pub fn new(naming: &'a dyn NamingConvention) -> Self {
        Self { naming }
    }

    pub fn read<T: HalLinks>(&self, value: &Value) -> Result<T, HalError> {
        self.read_with(T::descriptor(), value)
    }

    /// Read an instance using an explicit descriptor
    ///
    /// The selected constructor receives every relation its parameters are
    /// bound to. Afterwards, each readable and writable field that is still
    /// unset is assigned from the input, looked up by relation name and then
    /// by identifier. The identifier lookup is skipped when that key is the
    /// relation name of some field, so one relation never fills two fields.
    /// A field bound to a constructor parameter keeps whatever the
    /// constructor put there unless it is null.
    pub fn read_with<T>(
        &self,
        descriptor: &LinksDescriptor<T>,
        value: &Value,
    ) -> Result<T, HalError> {
        let type_name = descriptor.type_name();
        let Value::Object(object) = value else {
            return Err(HalError::TypeMismatch {
                type_name,
                found: json_kind(value),
            });
        };
        tracing::debug!(target_type = type_name, relations = object.len(), "reading link collection");

        let relations = RelationIndex::new(object, type_name);
        let candidate = constructor::select(descriptor)?;

        let mut bound = Vec::with_capacity(candidate.parameters().len());
        let mut constructor_bound = HashSet::with_capacity(candidate.parameters().len());
        for &parameter in candidate.parameters() {
            let field = descriptor
                .field(parameter)
                .ok_or_else(|| HalError::ConstructorResolution {
                    type_name,
                    reason: ResolutionFailure::UnboundParameter { parameter },
                })?;
            let relation = field.relation_name(self.naming);
            bound.push((parameter, relations.get(&relation)));
            constructor_bound.insert(fold_case(field.identifier()));
        }

        let mut instance = candidate
            .invoke(&ConstructorArgs::new(bound))
            .map_err(|fault| HalError::ConstructionInvocation { type_name, fault })?;

        let claimed: HashSet<String> = descriptor
            .fields()
            .iter()
            .map(|field| fold_case(&field.relation_name(self.naming)))
            .collect();

        for field in descriptor.fields() {
            if !field.is_writable() {
                continue;
            }
            let Some(current) = field.read_value(&instance) else {
                continue;
            };
            let current = current.map_err(|source| HalError::Assignment {
                type_name,
                field: field.identifier(),
                source,
            })?;
            let from_constructor = constructor_bound.contains(&fold_case(field.identifier()));
            if !is_unset(field, &current, from_constructor) {
                continue;
            }

            let relation = field.relation_name(self.naming);
            let Some(raw) = relations.get(&relation).or_else(|| {
                if claimed.contains(&fold_case(field.identifier())) {
                    None
                } else {
                    relations.get(field.identifier())
                }
            }) else {
                continue;
            };

            tracing::trace!(field = field.identifier(), relation = %relation, "assigning relation");
            if let Some(Err(source)) = field.assign_value(&mut instance, raw.clone()) {
                return Err(HalError::Assignment {
                    type_name,
                    field: field.identifier(),
                    source,
                });
            }
        }

        Ok(instance)
    }
}

/// Null is always unset. An empty sequence is unset only if no constructor
/// parameter filled it.
fn is_unset<T>(field: &RelationField<T>, current: &Value, from_constructor: bool) -> bool {
    match current {
        Value::Null => true,
        Value::Array(items) => {
            !from_constructor && field.shape() == ValueShape::Sequence && items.is_empty()
        }
        _ => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Case-insensitive view over the relations of one input object
///
/// Keys that differ only by case resolve to the first one in document order.
struct RelationIndex<'a> {
    entries: HashMap<String, &'a Value>,
}

impl<'a> RelationIndex<'a> {
    fn new(object: &'a Map<String, Value>, type_name: &'static str) -> Self {
        let mut entries = HashMap::with_capacity(object.len());
        for (key, value) in object {
            match entries.entry(fold_case(key)) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(
                        target_type = type_name,
                        relation = %key,
                        "ignoring relation that differs from an earlier one only by case"
                    );
                }
            }
        }
        Self { entries }
    }

    fn get(&self, relation: &str) -> Option<&'a Value> {
        self.entries.get(&fold_case(relation)).copied()
    }
}
