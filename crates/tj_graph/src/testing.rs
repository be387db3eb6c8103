//! Shared fixtures for codec tests.

use serde::{Deserialize, Serialize};

use crate::document::Node;
use crate::graph::Value;
use crate::handler::{HandlerRegistry, SerdeHandler};
use crate::info::{Capabilities, FieldInfo, TypeHint};
use crate::registry::{Allocation, TypeHandle, TypeMeta, TypeRegistry};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Celsius(pub f64);
crate::impl_type_path!(Celsius => "units.Celsius");

fn point_from_literals(ty: &TypeHandle, args: Vec<Value>) -> Option<Allocation> {
    ty.allocate(None, args).ok()
}

/// Types used across the codec tests.
///
/// - `pkg.Thing`: struct with `name` and `child`.
/// - `pkg.Bag`: list-like, `pkg.Tags`: set-like, `pkg.Lookup`: mapping-like.
/// - `pkg.DefaultMap`: mapping-like with a default factory.
/// - `pkg.Blob`: restored from state.
/// - `pkg.Strict`: cannot be allocated without arguments.
/// - `geo.Point`: record `(x, y)`, also buildable from a legacy payload.
/// - `geo.Shape`: struct with hinted attributes.
/// - `units.Celsius`: opaque, serde handler.
/// - `pkg.Socket`: opaque, no handler.
pub(crate) fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.insert(
        TypeMeta::structure("pkg.Thing")
            .with_field(FieldInfo::new("name"))
            .with_field(FieldInfo::new("child")),
    );
    registry.insert(
        TypeMeta::structure("pkg.Bag")
            .with_field(FieldInfo::new("label"))
            .with_capabilities(Capabilities::APPEND),
    );
    registry.insert(TypeMeta::structure("pkg.Tags").with_capabilities(Capabilities::INSERT));
    registry.insert(TypeMeta::structure("pkg.Lookup").with_capabilities(Capabilities::KEYED));
    registry.insert(
        TypeMeta::structure("pkg.DefaultMap")
            .with_capabilities(Capabilities::KEYED | Capabilities::FACTORY),
    );
    registry.insert(TypeMeta::structure("pkg.Blob").with_capabilities(Capabilities::STATE));
    registry.insert(TypeMeta::structure("pkg.Strict").without_default());
    registry.insert(
        TypeMeta::record("geo.Point", &["x", "y"]).with_legacy_constructor(point_from_literals),
    );
    registry.insert(
        TypeMeta::structure("geo.Shape")
            .with_field(FieldInfo::new("owner").with_hint(TypeHint::Instance("pkg.Thing")))
            .with_field(FieldInfo::new("corners").with_hint(TypeHint::ListOf("pkg.Thing")))
            .with_field(FieldInfo::new("named").with_hint(TypeHint::MapOf("pkg.Thing")))
            .with_field(FieldInfo::new("ghost").with_hint(TypeHint::Instance("nope.Ghost"))),
    );
    registry.insert(TypeMeta::opaque("units.Celsius"));
    registry.insert(TypeMeta::opaque("pkg.Socket"));
    registry
}

pub(crate) fn handlers() -> HandlerRegistry {
    let mut handlers = HandlerRegistry::with_builtins();
    handlers.register_for::<Celsius>(SerdeHandler::<Celsius>::new());
    handlers
}

pub(crate) fn parse(json: &str) -> Node {
    match serde_json::from_str(json) {
        Ok(node) => node,
        Err(err) => panic!("invalid test document {json}: {err}"),
    }
}

pub(crate) fn ty(registry: &TypeRegistry, path: &str) -> TypeHandle {
    match registry.resolve(path) {
        Some(ty) => ty,
        None => panic!("fixture type `{path}` is missing"),
    }
}
