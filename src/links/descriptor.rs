//! Type descriptors for link collections
//!
//! A [`LinksDescriptor`] states, once per type, everything the converter
//! needs to know about a link collection: its relation fields in write order
//! and the constructors it can be built with. Descriptors are built by hand
//! (usually through [`LinksDescriptor::builder`]) and memoized per type, so
//! no shape discovery happens on the read or write path.

use crate::core::error::ConstructorFault;
use crate::core::naming::NamingConvention;
use crate::core::uri::UriRef;
use crate::links::relation;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type Getter<T> = Arc<dyn Fn(&T) -> Result<Value, serde_json::Error> + Send + Sync>;
type Setter<T> = Arc<dyn Fn(&mut T, Value) -> Result<(), serde_json::Error> + Send + Sync>;
type Build<T> = Box<dyn Fn(&ConstructorArgs<'_>) -> Result<T, ConstructorFault> + Send + Sync>;

/// Root trait of every link collection type
///
/// Implementing it is what makes a type convertible. The descriptor must be
/// the same instance on every call; use [`impl_hal_links!`](crate::impl_hal_links)
/// or a `OnceLock` static.
pub trait HalLinks: Sized + Send + Sync + 'static {
    fn descriptor() -> &'static LinksDescriptor<Self>;
}

/// Declared value shape of a relation field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Exactly one link
    Single,
    /// Zero or one link
    Optional,
    /// Ordered sequence of links
    Sequence,
    /// Relative-or-absolute URI reference
    Uri,
    /// Any other plain value
    Scalar,
}

// =============================================================================
// Relation Fields
// =============================================================================

/// One named relation on a link collection type
pub struct RelationField<T> {
    identifier: &'static str,
    relation: Option<&'static str>,
    shape: ValueShape,
    declared_by: &'static str,
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T: 'static> RelationField<T> {
    fn readable(
        identifier: &'static str,
        shape: ValueShape,
        getter: Getter<T>,
    ) -> Self {
        Self {
            identifier,
            relation: None,
            shape,
            declared_by: "",
            getter: Some(getter),
            setter: None,
        }
    }

    /// A field holding exactly one value
    pub fn single<V, G>(identifier: &'static str, get: G) -> Self
    where
        V: Serialize,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        Self::readable(
            identifier,
            ValueShape::Single,
            Arc::new(move |t: &T| serde_json::to_value(get(t))),
        )
    }

    /// A field that may be absent
    pub fn optional<V, G>(identifier: &'static str, get: G) -> Self
    where
        V: Serialize,
        G: Fn(&T) -> &Option<V> + Send + Sync + 'static,
    {
        Self::readable(
            identifier,
            ValueShape::Optional,
            Arc::new(move |t: &T| serde_json::to_value(get(t))),
        )
    }

    /// A field holding an ordered sequence
    pub fn many<V, G>(identifier: &'static str, get: G) -> Self
    where
        V: Serialize,
        G: Fn(&T) -> &Vec<V> + Send + Sync + 'static,
    {
        Self::readable(
            identifier,
            ValueShape::Sequence,
            Arc::new(move |t: &T| serde_json::to_value(get(t))),
        )
    }

    /// An optional URI reference
    pub fn uri<G>(identifier: &'static str, get: G) -> Self
    where
        G: Fn(&T) -> &Option<UriRef> + Send + Sync + 'static,
    {
        Self::readable(
            identifier,
            ValueShape::Uri,
            Arc::new(move |t: &T| serde_json::to_value(get(t))),
        )
    }

    /// Any other serializable value
    pub fn scalar<V, G>(identifier: &'static str, get: G) -> Self
    where
        V: Serialize,
        G: Fn(&T) -> &V + Send + Sync + 'static,
    {
        Self::readable(
            identifier,
            ValueShape::Scalar,
            Arc::new(move |t: &T| serde_json::to_value(get(t))),
        )
    }

    /// A field that is only ever assigned, never written out
    pub fn write_only<V, S>(identifier: &'static str, shape: ValueShape, set: S) -> Self
    where
        V: DeserializeOwned,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            identifier,
            relation: None,
            shape,
            declared_by: "",
            getter: None,
            setter: Some(erase_setter(set)),
        }
    }

    /// Override the relation name instead of deriving it from the identifier
    pub fn rel(mut self, relation: &'static str) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Make the field assignable after construction
    pub fn writable<V, S>(mut self, set: S) -> Self
    where
        V: DeserializeOwned,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.setter = Some(erase_setter(set));
        self
    }

    fn project<D: 'static>(&self, projection: &Projection<D, T>) -> RelationField<D> {
        let getter = self.getter.clone().map(|get| {
            let project = projection.get.clone();
            Arc::new(move |d: &D| get(project(d))) as Getter<D>
        });
        let setter = self.setter.clone().map(|set| {
            let project = projection.get_mut.clone();
            Arc::new(move |d: &mut D, v: Value| set(project(d), v)) as Setter<D>
        });
        RelationField {
            identifier: self.identifier,
            relation: self.relation,
            shape: self.shape,
            declared_by: self.declared_by,
            getter,
            setter,
        }
    }
}

fn erase_setter<T, V, S>(set: S) -> Setter<T>
where
    T: 'static,
    V: DeserializeOwned,
    S: Fn(&mut T, V) + Send + Sync + 'static,
{
    Arc::new(move |t: &mut T, value: Value| {
        let converted = serde_json::from_value::<V>(value)?;
        set(t, converted);
        Ok(())
    })
}

impl<T> RelationField<T> {
    pub fn identifier(&self) -> &'static str {
        self.identifier
    }

    /// The explicit relation override, if any
    pub fn relation_override(&self) -> Option<&'static str> {
        self.relation
    }

    /// Wire name of this relation under the given convention
    pub fn relation_name(&self, naming: &dyn NamingConvention) -> String {
        relation::resolve(self.identifier, self.relation, naming)
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    /// Name of the type that declared this field
    pub fn declared_by(&self) -> &'static str {
        self.declared_by
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the field as generic JSON; `None` when the field is not readable
    pub(crate) fn read_value(&self, instance: &T) -> Option<Result<Value, serde_json::Error>> {
        self.getter.as_ref().map(|get| get(instance))
    }

    /// Convert and assign a generic JSON value; `None` when not writable
    pub(crate) fn assign_value(
        &self,
        instance: &mut T,
        value: Value,
    ) -> Option<Result<(), serde_json::Error>> {
        self.setter.as_ref().map(|set| set(instance, value))
    }
}

impl<T> fmt::Debug for RelationField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationField")
            .field("identifier", &self.identifier)
            .field("relation", &self.relation)
            .field("shape", &self.shape)
            .field("declared_by", &self.declared_by)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

struct Projection<D, B> {
    get: Arc<dyn Fn(&D) -> &B + Send + Sync>,
    get_mut: Arc<dyn Fn(&mut D) -> &mut B + Send + Sync>,
}

// =============================================================================
// Constructors
// =============================================================================

/// One way of building a link collection from parsed wire data
pub struct ConstructorCandidate<T> {
    parameters: Vec<&'static str>,
    designated: bool,
    build: Build<T>,
}

impl<T> ConstructorCandidate<T> {
    /// A constructor taking the named parameters
    ///
    /// Each parameter must match a relation field identifier
    /// (case-insensitively); the build function pulls typed values out of
    /// [`ConstructorArgs`].
    pub fn new<const N: usize, F>(parameters: [&'static str; N], build: F) -> Self
    where
        F: Fn(&ConstructorArgs<'_>) -> Result<T, ConstructorFault> + Send + Sync + 'static,
    {
        Self {
            parameters: parameters.to_vec(),
            designated: false,
            build: Box::new(build),
        }
    }

    /// A zero-parameter constructor
    pub fn nullary<F>(build: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            parameters: Vec::new(),
            designated: false,
            build: Box::new(move |_: &ConstructorArgs<'_>| Ok(build())),
        }
    }

    /// Mark this as the designated deserialization constructor
    pub fn designated(mut self) -> Self {
        self.designated = true;
        self
    }

    pub fn parameters(&self) -> &[&'static str] {
        &self.parameters
    }

    pub fn is_designated(&self) -> bool {
        self.designated
    }

    pub(crate) fn invoke(&self, args: &ConstructorArgs<'_>) -> Result<T, ConstructorFault> {
        (self.build)(args)
    }
}

impl<T> fmt::Debug for ConstructorCandidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorCandidate")
            .field("parameters", &self.parameters)
            .field("designated", &self.designated)
            .finish()
    }
}

/// Arguments bound to a constructor's parameters
///
/// A parameter whose relation is missing from the input is bound to nothing;
/// [`arg`](Self::arg) then converts from `null`, so parameter types should be
/// `Option<_>` or be fetched with [`arg_or_default`](Self::arg_or_default).
#[derive(Debug, Default)]
pub struct ConstructorArgs<'a> {
    bound: Vec<(&'static str, Option<&'a Value>)>,
}

impl<'a> ConstructorArgs<'a> {
    pub(crate) fn new(bound: Vec<(&'static str, Option<&'a Value>)>) -> Self {
        Self { bound }
    }

    fn lookup(&self, parameter: &str) -> Result<(&'static str, Option<&'a Value>), ConstructorFault> {
        self.bound
            .iter()
            .find(|(name, _)| eq_ignore_case(name, parameter))
            .copied()
            .ok_or_else(|| ConstructorFault::UndeclaredParameter {
                parameter: parameter.to_string(),
            })
    }

    /// Convert the argument to `V`, treating an absent relation as `null`
    pub fn arg<V: DeserializeOwned>(&self, parameter: &str) -> Result<V, ConstructorFault> {
        let (name, value) = self.lookup(parameter)?;
        let value = value.cloned().unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|source| ConstructorFault::Conversion {
            parameter: name,
            source,
        })
    }

    /// Convert the argument to `V`, using `V::default()` when absent or null
    pub fn arg_or_default<V>(&self, parameter: &str) -> Result<V, ConstructorFault>
    where
        V: DeserializeOwned + Default,
    {
        match self.lookup(parameter)? {
            (_, None) | (_, Some(Value::Null)) => Ok(V::default()),
            (name, Some(value)) => {
                serde_json::from_value(value.clone()).map_err(|source| {
                    ConstructorFault::Conversion {
                        parameter: name,
                        source,
                    }
                })
            }
        }
    }

    /// Whether the input carried the relation bound to this parameter
    pub fn is_present(&self, parameter: &str) -> bool {
        matches!(self.lookup(parameter), Ok((_, Some(_))))
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// Complete shape of one link collection type
pub struct LinksDescriptor<T> {
    type_name: &'static str,
    fields: Vec<RelationField<T>>,
    constructors: Vec<ConstructorCandidate<T>>,
    index: HashMap<String, usize>,
}

impl<T: 'static> LinksDescriptor<T> {
    pub fn builder(type_name: &'static str) -> LinksDescriptorBuilder<T> {
        LinksDescriptorBuilder {
            type_name,
            inherited: Vec::new(),
            own: Vec::new(),
            constructors: Vec::new(),
        }
    }
}

impl<T> LinksDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Relation fields in write order: base-most type first, then declaration order
    pub fn fields(&self) -> &[RelationField<T>] {
        &self.fields
    }

    pub fn constructors(&self) -> &[ConstructorCandidate<T>] {
        &self.constructors
    }

    /// Find a field by identifier, ignoring case
    pub fn field(&self, identifier: &str) -> Option<&RelationField<T>> {
        self.index
            .get(&fold_case(identifier))
            .map(|&position| &self.fields[position])
    }
}

impl<T> fmt::Debug for LinksDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinksDescriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("constructors", &self.constructors)
            .finish()
    }
}

/// Builder for [`LinksDescriptor`]
pub struct LinksDescriptorBuilder<T> {
    type_name: &'static str,
    inherited: Vec<RelationField<T>>,
    own: Vec<RelationField<T>>,
    constructors: Vec<ConstructorCandidate<T>>,
}

impl<T: 'static> LinksDescriptorBuilder<T> {
    /// Declare a relation field on this type
    pub fn field(mut self, field: RelationField<T>) -> Self {
        self.own.push(RelationField {
            declared_by: self.type_name,
            ..field
        });
        self
    }

    /// Take over every field of an embedded base collection
    ///
    /// Base fields always precede the fields declared on this type, in the
    /// order the base descriptor lists them. Constructors are not inherited.
    pub fn inherit<B, P, M>(mut self, base: &LinksDescriptor<B>, project: P, project_mut: M) -> Self
    where
        B: 'static,
        P: Fn(&T) -> &B + Send + Sync + 'static,
        M: Fn(&mut T) -> &mut B + Send + Sync + 'static,
    {
        let projection = Projection {
            get: Arc::new(project),
            get_mut: Arc::new(project_mut),
        };
        self.inherited
            .extend(base.fields().iter().map(|field| field.project(&projection)));
        self
    }

    pub fn constructor(mut self, constructor: ConstructorCandidate<T>) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn build(self) -> LinksDescriptor<T> {
        let mut fields = self.inherited;
        fields.extend(self.own);

        let mut index = HashMap::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            index.entry(fold_case(field.identifier)).or_insert(position);
        }

        LinksDescriptor {
            type_name: self.type_name,
            fields,
            constructors: self.constructors,
            index,
        }
    }
}

pub(crate) fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || fold_case(a) == fold_case(b)
}
