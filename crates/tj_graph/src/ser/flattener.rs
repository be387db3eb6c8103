use tj_utils::hash::{HashMap, HashSet};

use crate::config::Config;
use crate::document::{Mapping, Node};
use crate::error::Error;
use crate::graph::{Dict, Graph, Instance, ObjId, Object, Value};
use crate::handler::{Handler, HandlerRegistry};
use crate::info::Capabilities;
use crate::tags;

/// The state of one encode call.
///
/// Objects the decoder registers (lists, instances, handler results and
/// raw data) are numbered in first-visit order; a later visit emits an
/// `id` tag instead of the object. Dicts and sets have no number and are
/// inlined at every occurrence.
pub(crate) struct Flattener<'a> {
    graph: &'a Graph,
    handlers: &'a HandlerRegistry,
    config: &'a Config,
    ids: HashMap<ObjId, usize>,
    // dicts and sets currently being inlined
    inlining: HashSet<ObjId>,
    depth: usize,
}

impl<'a> Flattener<'a> {
    pub(crate) fn new(graph: &'a Graph, handlers: &'a HandlerRegistry, config: &'a Config) -> Self {
        Self {
            graph,
            handlers,
            config,
            ids: HashMap::default(),
            inlining: HashSet::default(),
            depth: 0,
        }
    }

    /// Flattens a whole graph from `root`.
    pub(crate) fn run(mut self, root: &Value) -> Result<Node, Error> {
        let node = self.flatten(root)?;
        log::trace!("flattened {} referable objects", self.ids.len());
        Ok(node)
    }

    fn flatten(&mut self, value: &Value) -> Result<Node, Error> {
        if self.depth >= self.config.max_depth {
            return Err(Error::DepthLimit(self.config.max_depth));
        }
        self.depth += 1;
        let result = self.flatten_value(value);
        self.depth -= 1;
        result
    }

    fn flatten_value(&mut self, value: &Value) -> Result<Node, Error> {
        Ok(match value {
            Value::Null => Node::Null,
            Value::Bool(value) => Node::Bool(*value),
            Value::Int(value) => Node::Int(*value),
            Value::Float(value) if !value.is_finite() => return Err(Error::NonFiniteFloat(*value)),
            Value::Float(value) => Node::Float(*value),
            Value::Str(value) => Node::Str(value.clone()),
            Value::Tuple(items) => tagged(tags::TUPLE, Node::Seq(self.flatten_all(items)?)),
            Value::Record(record) => {
                let mut map = Mapping::new();
                map.insert(tags::TYPE.into(), Node::from(record.ty().path()));
                map.insert(tags::SEQ.into(), Node::Seq(self.flatten_all(record.values())?));
                Node::Map(map)
            }
            Value::Type(ty) => tagged(tags::TYPE, Node::from(ty.path())),
            Value::Raw(node) => node.clone(),
            Value::Ref(id) => return self.flatten_object(*id),
        })
    }

    fn flatten_all<'v>(
        &mut self,
        values: impl IntoIterator<Item = &'v Value>,
    ) -> Result<Vec<Node>, Error> {
        values.into_iter().map(|value| self.flatten(value)).collect()
    }

    fn flatten_object(&mut self, id: ObjId) -> Result<Node, Error> {
        if let Some(&index) = self.ids.get(&id) {
            return Ok(tagged(tags::ID, Node::Int(index as i64)));
        }
        let graph = self.graph;
        let object = graph.get(id).ok_or(Error::UnknownObject(id))?;
        match object {
            Object::List(items) => {
                self.register(id);
                Ok(Node::Seq(self.flatten_all(items)?))
            }
            Object::Dict(dict) => self.inline(id, |this| this.flatten_dict(dict)),
            Object::Set(set) => self.inline(id, |this| {
                Ok(tagged(tags::SET, Node::Seq(this.flatten_all(set)?)))
            }),
            Object::Instance(_) | Object::Opaque(_) => {
                self.register(id);
                let path = object.type_path().unwrap_or_default();
                let handlers = self.handlers;
                match (handlers.lookup(path), object) {
                    (Some(handler), _) => self.flatten_with(handler, path, object),
                    (None, Object::Instance(instance)) => self.flatten_instance(instance),
                    (None, _) => Err(Error::MissingHandler(path.to_owned())),
                }
            }
            Object::Raw(node) => {
                self.register(id);
                Ok(node.clone())
            }
        }
    }

    fn register(&mut self, id: ObjId) {
        let next = self.ids.len();
        self.ids.insert(id, next);
    }

    // Dicts and sets carry no id, so a cycle reaching one of them again
    // cannot be written.
    fn inline(
        &mut self,
        id: ObjId,
        f: impl FnOnce(&mut Self) -> Result<Node, Error>,
    ) -> Result<Node, Error> {
        if !self.inlining.insert(id) {
            return Err(Error::UnrepresentableCycle(id));
        }
        let result = f(self);
        self.inlining.remove(&id);
        result
    }

    fn flatten_dict(&mut self, dict: &Dict) -> Result<Node, Error> {
        let mut map = Mapping::new();
        for (key, value) in dict {
            if tags::is_reserved(key) {
                return Err(Error::ReservedKey(key.clone()));
            }
            map.insert(key.clone(), self.flatten(value)?);
        }
        Ok(Node::Map(map))
    }

    fn flatten_with(
        &mut self,
        handler: &dyn Handler,
        path: &str,
        object: &Object,
    ) -> Result<Node, Error> {
        let mut map = Mapping::new();
        map.insert(tags::TYPE.into(), Node::from(path));
        handler.flatten(object, &mut map)?;
        Ok(Node::Map(structural(map)))
    }

    fn flatten_instance(&mut self, instance: &Instance) -> Result<Node, Error> {
        let ty = instance.ty();
        let mut map = Mapping::new();
        map.insert(tags::TYPE.into(), Node::from(ty.path()));
        if let Some(factory) = instance.factory() {
            map.insert(
                tags::DEFAULT_FACTORY.into(),
                tagged(tags::TYPE, Node::from(factory.path())),
            );
        }

        if let Some(state) = ty.state_of(instance) {
            map.insert(tags::STATE.into(), self.flatten(&state)?);
            return Ok(Node::Map(map));
        }

        // A keyed type reads every key back as an entry.
        let capabilities = ty.capabilities();
        let keyed = capabilities.contains(Capabilities::KEYED);
        if keyed && let Some(name) = instance.attrs().keys().next() {
            return Err(Error::KeyedAttribute(name.clone()));
        }
        let keys = if keyed { instance.entries() } else { instance.attrs() };
        for (key, value) in keys {
            // a factory type reads `default_factory` back as its factory
            if tags::is_reserved(key)
                || (capabilities.contains(Capabilities::FACTORY) && key == tags::DEFAULT_FACTORY)
            {
                return Err(Error::ReservedKey(key.clone()));
            }
            map.insert(key.clone(), self.flatten(value)?);
        }

        if capabilities.contains(Capabilities::APPEND) {
            let items = self.flatten_all(instance.items())?;
            map.insert(tags::SEQ.into(), Node::Seq(items));
        } else if capabilities.contains(Capabilities::INSERT) {
            let members = self.flatten_all(instance.members())?;
            map.insert(tags::SEQ.into(), Node::Seq(members));
        }

        Ok(Node::Map(structural(map)))
    }
}

/// A one-entry mapping `{tag: node}`.
fn tagged(tag: &str, node: Node) -> Node {
    Node::Map(Mapping::from([(tag.to_owned(), node)]))
}

/// Adds an empty `seq` to a mapping holding only its `type` tag, which
/// would otherwise read back as a reference to the type itself.
fn structural(mut map: Mapping) -> Mapping {
    if map.len() == 1 {
        map.insert(tags::SEQ.into(), Node::Seq(Vec::new()));
    }
    map
}
