use core::fmt;
use std::sync::Arc;

use super::{AllocError, ApplyError};
use crate::graph::{Instance, Record, Value};
use crate::info::{Capabilities, FieldInfo, TypeHint, TypeKind, split_type_path};

/// Shared handle to registered metadata.
pub type TypeHandle = Arc<TypeMeta>;

/// Captures the state of an instance, see [`TypeMeta::with_state_hooks`].
pub type GetState = fn(&Instance) -> Option<Value>;

/// Applies a state payload to a freshly allocated instance.
pub type SetState = fn(&mut Instance, Value) -> Result<(), ApplyError>;

/// Builds a value from the literal arguments of a legacy `repr` payload.
///
/// Returning `None` rejects the arguments.
pub type LegacyConstructor = fn(&TypeHandle, Vec<Value>) -> Option<Allocation>;

// -----------------------------------------------------------------------------
// Allocation

/// The result of [`TypeMeta::allocate`].
#[derive(Debug)]
pub enum Allocation {
    /// A blank instance, to be registered and then populated.
    Instance(Instance),
    /// A complete record.
    Record(Record),
}

// -----------------------------------------------------------------------------
// TypeMeta

/// Everything the codec needs to know about one type.
///
/// # Examples
///
/// ```
/// use tj_graph::info::{Capabilities, FieldInfo, TypeKind};
/// use tj_graph::registry::TypeMeta;
///
/// let meta = TypeMeta::structure("pkg.Bag")
///     .with_field(FieldInfo::new("label"))
///     .with_capabilities(Capabilities::APPEND);
///
/// assert_eq!(meta.kind(), TypeKind::Struct);
/// assert_eq!(meta.name(), "Bag");
/// assert!(meta.capabilities().contains(Capabilities::APPEND));
///
/// let point = TypeMeta::record("geo.Point", &["x", "y"]);
/// assert_eq!(point.arity(), Some(2));
/// ```
pub struct TypeMeta {
    path: &'static str,
    kind: TypeKind,
    fields: Vec<FieldInfo>,
    capabilities: Capabilities,
    default_constructible: bool,
    get_state: Option<GetState>,
    set_state: Option<SetState>,
    legacy: Option<LegacyConstructor>,
}

impl TypeMeta {
    const fn new(path: &'static str, kind: TypeKind) -> Self {
        Self {
            path,
            kind,
            fields: Vec::new(),
            capabilities: Capabilities::empty(),
            default_constructible: true,
            get_state: None,
            set_state: None,
            legacy: None,
        }
    }

    /// A mutable struct type with an argument-free constructor.
    pub const fn structure(path: &'static str) -> Self {
        Self::new(path, TypeKind::Struct)
    }

    /// A record type with the given positional fields.
    pub fn record(path: &'static str, fields: &[&'static str]) -> Self {
        let mut meta = Self::new(path, TypeKind::Record);
        meta.fields = fields.iter().map(|name| FieldInfo::new(*name)).collect();
        meta
    }

    /// A type without structural representation.
    pub const fn opaque(path: &'static str) -> Self {
        let mut meta = Self::new(path, TypeKind::Opaque);
        meta.default_constructible = false;
        meta
    }

    /// Declares a field, replacing an existing one with the same name.
    pub fn with_field(mut self, field: FieldInfo) -> Self {
        match self.fields.iter_mut().find(|f| f.name() == field.name()) {
            Some(slot) => *slot = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Adds capabilities to the type.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    /// Marks a struct type as requiring constructor arguments.
    ///
    /// Decoding such a type from a mapping fails to allocate, and the
    /// mapping is kept as raw data.
    pub fn without_default(mut self) -> Self {
        self.default_constructible = false;
        self
    }

    /// Installs custom state hooks and adds [`Capabilities::STATE`].
    ///
    /// Types with `STATE` but without hooks read and write
    /// [`Instance::stored_state`].
    pub fn with_state_hooks(mut self, get: GetState, set: SetState) -> Self {
        self.get_state = Some(get);
        self.set_state = Some(set);
        self.capabilities |= Capabilities::STATE;
        self
    }

    /// Allows the type to be built from a legacy `repr` payload.
    pub fn with_legacy_constructor(mut self, construct: LegacyConstructor) -> Self {
        self.legacy = Some(construct);
        self
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The last segment of the path.
    pub fn name(&self) -> &'static str {
        split_type_path(self.path).map_or(self.path, |(_, name)| name)
    }

    /// The namespace of the path, if any.
    pub fn namespace(&self) -> Option<&'static str> {
        split_type_path(self.path).map(|(module, _)| module)
    }

    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    #[inline]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// The number of positional values of a record type.
    pub fn arity(&self) -> Option<usize> {
        match self.kind {
            TypeKind::Record => Some(self.fields.len()),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_default_constructible(&self) -> bool {
        self.default_constructible
    }

    #[inline]
    pub const fn legacy_constructor(&self) -> Option<LegacyConstructor> {
        self.legacy
    }

    /// The expected type of attribute `name`.
    ///
    /// An explicit hint wins; otherwise a record default implies its type.
    pub fn attribute_hint(&self, name: &str) -> Option<TypeHint> {
        let field = self.field(name)?;
        field.hint().or_else(|| match field.default_value() {
            Value::Record(record) => Some(TypeHint::Instance(record.ty().path())),
            _ => None,
        })
    }

    /// Allocates a value of this type.
    ///
    /// Records consume `args` and come back complete. Structs come back
    /// blank; `factory` is kept only if the type has
    /// [`Capabilities::FACTORY`].
    pub fn allocate(
        self: &Arc<Self>,
        factory: Option<TypeHandle>,
        args: Vec<Value>,
    ) -> Result<Allocation, AllocError> {
        match self.kind {
            TypeKind::Opaque => Err(AllocError::Opaque(self.path)),
            TypeKind::Record => {
                let record = Record::new(Arc::clone(self), args)?;
                Ok(Allocation::Record(record))
            }
            TypeKind::Struct => {
                if !self.default_constructible {
                    return Err(AllocError::MissingArguments(self.path));
                }
                let mut instance = Instance::new(Arc::clone(self));
                if let Some(factory) = factory {
                    if self.capabilities.contains(Capabilities::FACTORY) {
                        instance.set_factory(factory);
                    } else {
                        log::warn!(
                            "type `{}` takes no default factory, discarding `{}`",
                            self.path,
                            factory.path(),
                        );
                    }
                }
                Ok(Allocation::Instance(instance))
            }
        }
    }

    /// Captures the state of `instance`, `None` unless the type has
    /// [`Capabilities::STATE`].
    pub fn state_of(&self, instance: &Instance) -> Option<Value> {
        if !self.capabilities.contains(Capabilities::STATE) {
            return None;
        }
        match self.get_state {
            Some(get) => get(instance),
            None => instance.stored_state().cloned(),
        }
    }

    /// Applies a state payload to `instance`.
    pub fn apply_state(&self, instance: &mut Instance, state: Value) -> Result<(), ApplyError> {
        if !self.capabilities.contains(Capabilities::STATE) {
            return Err(ApplyError::NoState(self.path));
        }
        match self.set_state {
            Some(set) => set(instance, state),
            None => {
                instance.store_state(state);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
