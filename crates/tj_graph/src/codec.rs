use core::fmt;

use crate::backend::{Backend, JsonBackend, load_backend};
use crate::config::Config;
use crate::de::{Expected, Restorer};
use crate::document::Node;
use crate::error::Error;
use crate::graph::{Graph, Value};
use crate::handler::HandlerRegistry;
use crate::registry::TypeRegistry;
use crate::ser::Flattener;

// -----------------------------------------------------------------------------
// Codec

/// Converts between object graphs, tagged documents and bytes.
///
/// A codec borrows the type and handler registries and owns its backend.
/// Every call is independent: reference numbering restarts at zero.
///
/// Dicts and sets carry no `id` tag. A dict or set reached from two places
/// is written twice and decodes as two separate objects; share it through
/// a list or an instance to keep one object.
///
/// # Examples
///
/// ```
/// use tj_graph::graph::{Dict, Graph, Instance, Object, Value};
/// use tj_graph::handler::HandlerRegistry;
/// use tj_graph::info::FieldInfo;
/// use tj_graph::registry::{TypeMeta, TypeRegistry};
/// use tj_graph::Codec;
///
/// let mut registry = TypeRegistry::new();
/// let thing = registry.insert(
///     TypeMeta::structure("pkg.Thing")
///         .with_field(FieldInfo::new("name"))
///         .with_field(FieldInfo::new("child")),
/// );
/// let handlers = HandlerRegistry::with_builtins();
///
/// let mut graph = Graph::new();
/// let data = graph.alloc(
///     Instance::new(thing)
///         .with_attr("name", "data")
///         .with_attr("child", Value::Null),
/// );
/// let things = graph.alloc(vec![data]);
/// let root = graph.alloc(Dict::from([("things".to_owned(), things)]));
///
/// let codec = Codec::new(&registry, &handlers);
/// let text = codec.encode_to_string(&graph, &root).unwrap();
/// assert_eq!(
///     text,
///     r#"{"things":[{"child":null,"name":"data","type":"pkg.Thing"}]}"#,
/// );
///
/// let mut decoded = Graph::new();
/// let restored = codec.decode(text.as_bytes(), &mut decoded).unwrap();
/// assert!(graph.structurally_eq(&root, &decoded, &restored));
/// ```
pub struct Codec<'a> {
    registry: &'a TypeRegistry,
    handlers: &'a HandlerRegistry,
    backend: Box<dyn Backend>,
    config: Config,
}

impl<'a> Codec<'a> {
    /// A codec with the default config and the compact JSON backend.
    pub fn new(registry: &'a TypeRegistry, handlers: &'a HandlerRegistry) -> Self {
        Self {
            registry,
            handlers,
            backend: Box::new(JsonBackend::compact()),
            config: Config::default(),
        }
    }

    /// A codec using the backend named in `config`.
    pub fn with_config(
        registry: &'a TypeRegistry,
        handlers: &'a HandlerRegistry,
        config: Config,
    ) -> Result<Self, Error> {
        let backend = load_backend(&config.backend)?;
        Ok(Self {
            registry,
            handlers,
            backend,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Switches to the backend named `name`.
    ///
    /// On error the current backend stays in place.
    pub fn set_backend(&mut self, name: &str) -> Result<(), Error> {
        self.backend = load_backend(name)?;
        self.config.backend = name.to_owned();
        Ok(())
    }

    /// Installs a backend not known to [`load_backend`].
    pub fn set_custom_backend(&mut self, backend: impl Backend + 'static) {
        self.config.backend = backend.name().to_owned();
        self.backend = Box::new(backend);
    }

    /// Flattens the graph reachable from `root` into a tagged document.
    pub fn flatten(&self, graph: &Graph, root: &Value) -> Result<Node, Error> {
        Flattener::new(graph, self.handlers, &self.config).run(root)
    }

    /// Restores a tagged document into `graph`, returning the root value.
    pub fn restore(&self, document: &Node, graph: &mut Graph) -> Result<Value, Error> {
        Restorer::new(self.registry, self.handlers, &self.config, graph).run(document, None)
    }

    /// Like [`restore`](Self::restore), but an untagged root mapping is
    /// restored as an instance of `type_path`.
    ///
    /// An unregistered `type_path` is ignored with a warning.
    pub fn restore_as(
        &self,
        document: &Node,
        type_path: &str,
        graph: &mut Graph,
    ) -> Result<Value, Error> {
        let expected = self.registry.resolve(type_path).map(Expected::Instance);
        if expected.is_none() {
            log::warn!("expected type `{type_path}` is not registered, ignoring it");
        }
        Restorer::new(self.registry, self.handlers, &self.config, graph).run(document, expected)
    }

    /// Flattens and serializes with the current backend.
    pub fn encode(&self, graph: &Graph, root: &Value) -> Result<Vec<u8>, Error> {
        let document = self.flatten(graph, root)?;
        self.backend.serialize(&document)
    }

    /// Like [`encode`](Self::encode), for text backends.
    pub fn encode_to_string(&self, graph: &Graph, root: &Value) -> Result<String, Error> {
        let bytes = self.encode(graph, root)?;
        String::from_utf8(bytes).map_err(|err| Error::Utf8(err.utf8_error()))
    }

    /// Parses with the current backend and restores into `graph`.
    pub fn decode(&self, bytes: &[u8], graph: &mut Graph) -> Result<Value, Error> {
        let document = self.backend.parse(bytes)?;
        self.restore(&document, graph)
    }

    /// Like [`decode`](Self::decode), with an expected root type.
    pub fn decode_as(
        &self,
        bytes: &[u8],
        type_path: &str,
        graph: &mut Graph,
    ) -> Result<Value, Error> {
        let document = self.backend.parse(bytes)?;
        self.restore_as(&document, type_path, graph)
    }
}

impl fmt::Debug for Codec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests
