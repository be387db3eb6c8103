use super::legacy;
use super::references::{NameStack, ReferenceTable};
use crate::config::{Config, LegacyRepr};
use crate::document::{Mapping, Node};
use crate::error::Error;
use crate::graph::{Dict, Graph, Instance, ObjId, Object, Value, ValueSet};
use crate::handler::HandlerRegistry;
use crate::info::{Capabilities, TypeHint};
use crate::registry::{Allocation, TypeHandle, TypeMeta, TypeRegistry};
use crate::tags;

// -----------------------------------------------------------------------------
// Expected

/// The type the caller expects a node to decode into.
#[derive(Debug, Clone)]
pub(crate) enum Expected {
    Instance(TypeHandle),
    ListOf(TypeHandle),
    SetOf(TypeHandle),
    MapOf(TypeHandle),
}

// -----------------------------------------------------------------------------
// Restorer

/// The state of one decode call.
///
/// Objects are registered in the reference table when they are created and
/// before their children are restored, so `id` tags inside an object can
/// point back at it.
pub(crate) struct Restorer<'a> {
    registry: &'a TypeRegistry,
    handlers: &'a HandlerRegistry,
    config: &'a Config,
    graph: &'a mut Graph,
    table: ReferenceTable,
    names: NameStack,
    depth: usize,
}

impl<'a> Restorer<'a> {
    pub(crate) fn new(
        registry: &'a TypeRegistry,
        handlers: &'a HandlerRegistry,
        config: &'a Config,
        graph: &'a mut Graph,
    ) -> Self {
        Self {
            registry,
            handlers,
            config,
            graph,
            table: ReferenceTable::default(),
            names: NameStack::default(),
            depth: 0,
        }
    }

    /// Restores a whole document.
    pub(crate) fn run(mut self, node: &Node, expected: Option<Expected>) -> Result<Value, Error> {
        let value = self.restore(node, expected)?;
        log::trace!("restored {} referable objects", self.table.len());
        Ok(value)
    }

    fn restore(&mut self, node: &Node, expected: Option<Expected>) -> Result<Value, Error> {
        if self.depth >= self.config.max_depth {
            return Err(Error::DepthLimit(self.config.max_depth));
        }
        self.depth += 1;
        let result = match node {
            Node::Map(map) => self.restore_mapping(node, map, expected),
            Node::Seq(items) => self.restore_list(items, expected),
            Node::Null => Ok(Value::Null),
            Node::Bool(value) => Ok(Value::Bool(*value)),
            Node::Int(value) => Ok(Value::Int(*value)),
            Node::Float(value) => Ok(Value::Float(*value)),
            Node::Str(value) => Ok(Value::Str(value.clone())),
        };
        self.depth -= 1;
        result
    }

    // Tags are tried in a fixed order; the first one present decides.
    fn restore_mapping(
        &mut self,
        node: &Node,
        map: &Mapping,
        expected: Option<Expected>,
    ) -> Result<Value, Error> {
        if let Some(id) = map.get(tags::ID) {
            return self.resolve_id(id);
        }
        if let Some(path) = map.get(tags::REF) {
            return Ok(self.resolve_path(path));
        }
        if let Some(name) = map.get(tags::TYPE) {
            let ty = name.as_str().and_then(|name| self.registry.resolve(name));
            if map.len() == 1 {
                return Ok(ty.map_or_else(|| Value::Raw(node.clone()), Value::Type));
            }
            if !map.contains_key(tags::REPR) {
                return match ty {
                    Some(ty) => self.restore_instance(node, map, ty),
                    None => {
                        log::debug!("unknown type {name:?}, keeping the mapping as raw data");
                        Ok(Value::Raw(node.clone()))
                    }
                };
            }
        }
        if let Some(repr) = map.get(tags::REPR) {
            return self.restore_repr(repr);
        }
        if let Some(Expected::Instance(ty)) = &expected
            && !map.contains_key(tags::TUPLE)
            && !map.contains_key(tags::SET)
        {
            let ty = ty.clone();
            return self.restore_instance(node, map, ty);
        }
        if let Some(items) = map.get(tags::TUPLE) {
            return self.restore_tuple(node, items);
        }
        if let Some(items) = map.get(tags::SET) {
            return self.restore_set(node, items, expected);
        }
        self.restore_dict(map, expected)
    }

    fn resolve_id(&self, id: &Node) -> Result<Value, Error> {
        let index = id
            .as_i64()
            .and_then(|index| usize::try_from(index).ok())
            .ok_or_else(|| Error::MalformedReference(format!("{id:?}")))?;
        self.table.get(index).cloned().ok_or(Error::DanglingReference {
            index,
            len: self.table.len(),
        })
    }

    fn resolve_path(&self, path: &Node) -> Value {
        match path.as_str().and_then(|path| self.names.lookup(path)) {
            Some(value) => value.clone(),
            None => {
                log::debug!("legacy reference {path:?} has no target, restoring null");
                Value::Null
            }
        }
    }

    fn restore_repr(&mut self, repr: &Node) -> Result<Value, Error> {
        let Some(text) = repr.as_str() else {
            return Err(Error::UnsupportedLegacy(format!("{repr:?}")));
        };
        let unsupported = || Error::UnsupportedLegacy(text.to_owned());
        if self.config.legacy_repr == LegacyRepr::Reject {
            return Err(unsupported());
        }
        let call = legacy::parse_repr(text).ok_or_else(unsupported)?;
        let ty = self
            .registry
            .resolve(call.callee)
            .or_else(|| self.registry.resolve(&format!("{}.{}", call.module, call.callee)))
            .ok_or_else(unsupported)?;
        let construct = ty.legacy_constructor().ok_or_else(unsupported)?;
        match construct(&ty, call.args).ok_or_else(unsupported)? {
            Allocation::Instance(instance) => Ok(Value::Ref(self.register_object(instance))),
            Allocation::Record(record) => {
                let value = Value::Record(record);
                self.register(value.clone());
                Ok(value)
            }
        }
    }

    fn restore_instance(
        &mut self,
        node: &Node,
        map: &Mapping,
        ty: TypeHandle,
    ) -> Result<Value, Error> {
        if let Some(handler) = self.handlers.lookup(ty.path()) {
            let object = handler.restore(map)?;
            return Ok(Value::Ref(self.register_object(object)));
        }

        let factory = self.load_factory(map, &ty);
        let consumed_factory = factory.is_some();
        let args = self.constructor_args(map, &ty)?;
        let instance = match ty.allocate(factory, args) {
            Ok(Allocation::Instance(instance)) => instance,
            Ok(Allocation::Record(record)) => return Ok(Value::Record(record)),
            Err(err) => {
                log::debug!("{err}, keeping the mapping as raw data");
                return Ok(Value::Ref(self.register_object(Object::Raw(node.clone()))));
            }
        };
        let id = self.register_object(instance);
        let capabilities = ty.capabilities();

        if capabilities.contains(Capabilities::STATE)
            && let Some(state) = map.get(tags::STATE)
        {
            let state = self.restore(state, None)?;
            let instance = self.instance_mut(id)?;
            ty.apply_state(instance, state).map_err(|source| Error::State {
                path: ty.path().to_owned(),
                source,
            })?;
            return Ok(Value::Ref(id));
        }

        for (key, child) in map {
            if tags::is_reserved(key) || (consumed_factory && key == tags::DEFAULT_FACTORY) {
                continue;
            }
            let expected = ty.attribute_hint(key).and_then(|hint| self.expect(hint));
            self.names.push(key);
            let value = self.restore(child, expected);
            self.names.pop();
            let value = value?;
            self.instance_mut(id)?.assign(key.clone(), value);
        }

        if let Some(Node::Seq(items)) = map.get(tags::SEQ)
            && capabilities.intersects(Capabilities::APPEND | Capabilities::INSERT)
        {
            for item in items {
                let value = self.restore(item, None)?;
                let instance = self.instance_mut(id)?;
                if capabilities.contains(Capabilities::APPEND | Capabilities::INSERT) {
                    instance.push_item(value.clone());
                    instance.add_member(value);
                } else if capabilities.contains(Capabilities::APPEND) {
                    instance.push_item(value);
                } else {
                    instance.add_member(value);
                }
            }
        }

        Ok(Value::Ref(id))
    }

    /// The `default_factory` of `map`, if `ty` accepts one and it resolves.
    fn load_factory(&self, map: &Mapping, ty: &TypeMeta) -> Option<TypeHandle> {
        if !ty.capabilities().contains(Capabilities::FACTORY) {
            return None;
        }
        let name = map.get(tags::DEFAULT_FACTORY)?.get(tags::TYPE)?.as_str()?;
        let factory = self.registry.resolve(name);
        if factory.is_none() {
            log::warn!("default factory `{name}` of `{}` is not registered", ty.path());
        }
        factory
    }

    /// Positional values for record types whose arity matches `seq`.
    fn constructor_args(&mut self, map: &Mapping, ty: &TypeMeta) -> Result<Vec<Value>, Error> {
        let (Some(arity), Some(Node::Seq(items))) = (ty.arity(), map.get(tags::SEQ)) else {
            return Ok(Vec::new());
        };
        if items.len() != arity {
            return Ok(Vec::new());
        }
        items
            .iter()
            .zip(ty.fields())
            .map(|(item, field)| {
                let expected = ty.attribute_hint(field.name()).and_then(|hint| self.expect(hint));
                self.restore(item, expected)
            })
            .collect()
    }

    fn expect(&self, hint: TypeHint) -> Option<Expected> {
        let Some(ty) = self.registry.resolve(hint.type_path()) else {
            log::warn!("type hint `{}` is not registered, ignoring it", hint.type_path());
            return None;
        };
        Some(match hint {
            TypeHint::Instance(_) => Expected::Instance(ty),
            TypeHint::ListOf(_) => Expected::ListOf(ty),
            TypeHint::SetOf(_) => Expected::SetOf(ty),
            TypeHint::MapOf(_) => Expected::MapOf(ty),
        })
    }

    fn restore_list(&mut self, items: &[Node], expected: Option<Expected>) -> Result<Value, Error> {
        let element = match expected {
            Some(Expected::ListOf(ty)) => Some(Expected::Instance(ty)),
            _ => None,
        };
        let id = self.register_object(Object::List(Vec::new()));
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            values.push(self.restore(item, element.clone())?);
        }
        if let Some(list) = self.graph.list_mut(id) {
            *list = values;
        }
        Ok(Value::Ref(id))
    }

    fn restore_tuple(&mut self, node: &Node, items: &Node) -> Result<Value, Error> {
        let Node::Seq(items) = items else {
            log::debug!("tuple tag without a sequence, keeping the mapping as raw data");
            return Ok(Value::Raw(node.clone()));
        };
        let values = items
            .iter()
            .map(|item| self.restore(item, None))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Tuple(values))
    }

    fn restore_set(
        &mut self,
        node: &Node,
        items: &Node,
        expected: Option<Expected>,
    ) -> Result<Value, Error> {
        let Node::Seq(items) = items else {
            log::debug!("set tag without a sequence, keeping the mapping as raw data");
            return Ok(Value::Raw(node.clone()));
        };
        let element = match expected {
            Some(Expected::SetOf(ty)) => Some(Expected::Instance(ty)),
            _ => None,
        };
        let mut set = ValueSet::new();
        for item in items {
            set.insert(self.restore(item, element.clone())?);
        }
        Ok(self.graph.alloc(Object::Set(set)))
    }

    fn restore_dict(&mut self, map: &Mapping, expected: Option<Expected>) -> Result<Value, Error> {
        let element = match expected {
            Some(Expected::MapOf(ty)) => Some(Expected::Instance(ty)),
            _ => None,
        };
        let mut dict = Dict::new();
        for (key, child) in map {
            self.names.push(key);
            let value = self.restore(child, element.clone());
            self.names.pop();
            dict.insert(key.clone(), value?);
        }
        Ok(self.graph.alloc(Object::Dict(dict)))
    }

    fn instance_mut(&mut self, id: ObjId) -> Result<&mut Instance, Error> {
        self.graph.instance_mut(id).ok_or(Error::UnknownObject(id))
    }

    fn register_object(&mut self, object: impl Into<Object>) -> ObjId {
        let id = self.graph.insert(object);
        self.register(Value::Ref(id));
        id
    }

    fn register(&mut self, value: Value) {
        self.names.bind(value.clone());
        self.table.push(value);
    }
}
