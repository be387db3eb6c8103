//! Flattening an object graph into a tagged document.

mod flattener;

pub(crate) use flattener::Flattener;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use crate::config::Config;
    use crate::graph::{Dict, Graph, Instance, Object, Record, Value, ValueSet};
    use crate::testing::{Celsius, handlers, parse, registry, ty};
    use crate::{Codec, Error};

    fn encode(graph: &Graph, root: &Value) -> Result<String, Error> {
        let registry = registry();
        let handlers = handlers();
        Codec::new(&registry, &handlers).encode_to_string(graph, root)
    }

    fn encode_ok(graph: &Graph, root: &Value) -> String {
        match encode(graph, root) {
            Ok(text) => text,
            Err(err) => panic!("{err}"),
        }
    }

    #[test]
    fn scalars_tuples_records_types() {
        let registry = registry();
        let graph = Graph::new();
        let point = Record::new(ty(&registry, "geo.Point"), vec![Value::Int(1), Value::Int(2)])
            .unwrap();
        let root = Value::Tuple(vec![
            Value::Null,
            Value::Bool(false),
            Value::Float(0.5),
            Value::from("s"),
            Value::Record(point),
            Value::Type(ty(&registry, "pkg.Thing")),
        ]);
        assert_eq!(
            encode_ok(&graph, &root),
            r#"{"tuple":[null,false,0.5,"s",{"seq":[1,2],"type":"geo.Point"},{"type":"pkg.Thing"}]}"#,
        );
    }

    #[test]
    fn documented_example() {
        let registry = registry();
        let mut graph = Graph::new();
        let thing = graph.alloc(
            Instance::new(ty(&registry, "pkg.Thing"))
                .with_attr("name", "data")
                .with_attr("child", Value::Null),
        );
        let things = graph.alloc(vec![thing]);
        let root = graph.alloc(Dict::from([("things".to_owned(), things)]));
        assert_eq!(
            encode_ok(&graph, &root),
            r#"{"things":[{"child":null,"name":"data","type":"pkg.Thing"}]}"#,
        );
    }

    #[test]
    fn shared_objects_become_ids() {
        let registry = registry();
        let mut graph = Graph::new();
        let thing = graph.alloc(Instance::new(ty(&registry, "pkg.Thing")).with_attr("name", "x"));
        let root = graph.alloc(vec![thing.clone(), thing]);
        assert_eq!(
            encode_ok(&graph, &root),
            r#"[{"name":"x","type":"pkg.Thing"},{"id":1}]"#,
        );
    }

    #[test]
    fn cycles_through_referable_objects() {
        let registry = registry();
        let mut graph = Graph::new();
        let list = graph.insert(Object::List(vec![Value::Int(1)]));
        graph.list_mut(list).unwrap().push(Value::Ref(list));
        assert_eq!(encode_ok(&graph, &Value::Ref(list)), r#"[1,{"id":0}]"#);

        let id = graph.insert(Instance::new(ty(&registry, "pkg.Thing")));
        graph.instance_mut(id).unwrap().set_attr("child", Value::Ref(id));
        assert_eq!(
            encode_ok(&graph, &Value::Ref(id)),
            r#"{"child":{"id":0},"type":"pkg.Thing"}"#,
        );
    }

    #[test]
    fn dicts_and_sets_are_inlined() {
        let mut graph = Graph::new();
        let inner = graph.alloc(Dict::from([("a".to_owned(), Value::Int(1))]));
        let root = graph.alloc(vec![inner.clone(), inner]);
        assert_eq!(encode_ok(&graph, &root), r#"[{"a":1},{"a":1}]"#);

        let set = graph.alloc(ValueSet::from_iter([Value::Int(1)]));
        let root = graph.alloc(vec![set.clone(), set]);
        assert_eq!(encode_ok(&graph, &root), r#"[{"set":[1]},{"set":[1]}]"#);
    }

    #[test]
    fn cycles_through_dicts_fail() {
        let mut graph = Graph::new();
        let dict = graph.insert(Dict::new());
        graph.dict_mut(dict).unwrap().insert("me".into(), Value::Ref(dict));
        assert!(matches!(
            encode(&graph, &Value::Ref(dict)),
            Err(Error::UnrepresentableCycle(id)) if id == dict,
        ));

        // a list on the cycle does not help, the dict is reached again first
        let dict = graph.insert(Dict::new());
        let list = graph.alloc(vec![Value::Ref(dict)]);
        graph.dict_mut(dict).unwrap().insert("list".into(), list);
        assert!(matches!(
            encode(&graph, &Value::Ref(dict)),
            Err(Error::UnrepresentableCycle(_)),
        ));
    }

    #[test]
    fn reserved_keys() {
        let registry = registry();
        let mut graph = Graph::new();
        let root = graph.alloc(Dict::from([("type".to_owned(), Value::from("x"))]));
        assert!(matches!(encode(&graph, &root), Err(Error::ReservedKey(key)) if key == "type"));

        let root = graph.alloc(Instance::new(ty(&registry, "pkg.Thing")).with_attr("seq", 1));
        assert!(matches!(encode(&graph, &root), Err(Error::ReservedKey(key)) if key == "seq"));
    }

    #[test]
    fn empty_instance_keeps_a_marker() {
        let registry = registry();
        let mut graph = Graph::new();
        let root = graph.alloc(Instance::new(ty(&registry, "pkg.Thing")));
        assert_eq!(encode_ok(&graph, &root), r#"{"seq":[],"type":"pkg.Thing"}"#);
    }

    #[test]
    fn container_capabilities() {
        let registry = registry();
        let mut graph = Graph::new();

        let mut bag = Instance::new(ty(&registry, "pkg.Bag")).with_attr("label", "b");
        bag.push_item(Value::Int(2));
        bag.push_item(Value::Int(1));
        let root = graph.alloc(bag);
        assert_eq!(encode_ok(&graph, &root), r#"{"label":"b","seq":[2,1],"type":"pkg.Bag"}"#);

        let mut lookup = Instance::new(ty(&registry, "pkg.Lookup"));
        lookup.insert_entry("k", Value::Int(1));
        let root = graph.alloc(lookup);
        assert_eq!(encode_ok(&graph, &root), r#"{"k":1,"type":"pkg.Lookup"}"#);

        let mut labelled = Instance::new(ty(&registry, "pkg.Lookup")).with_attr("label", "x");
        labelled.insert_entry("k", Value::Int(1));
        let root = graph.alloc(labelled);
        assert!(matches!(encode(&graph, &root), Err(Error::KeyedAttribute(name)) if name == "label"));
    }

    #[test]
    fn factory_and_state() {
        let registry = registry();
        let mut graph = Graph::new();

        let map = ty(&registry, "pkg.DefaultMap");
        let factory = Some(ty(&registry, "pkg.Thing"));
        let Ok(crate::registry::Allocation::Instance(mut instance)) = map.allocate(factory, Vec::new())
        else {
            panic!("allocation failed");
        };
        instance.insert_entry("k", Value::Int(1));
        let root = graph.alloc(instance);
        assert_eq!(
            encode_ok(&graph, &root),
            r#"{"default_factory":{"type":"pkg.Thing"},"k":1,"type":"pkg.DefaultMap"}"#,
        );

        // Any `default_factory` key of a factory type would be taken as the factory.
        let thing = graph.alloc(Instance::new(ty(&registry, "pkg.Thing")).with_attr("name", "t"));
        let mut plain = Instance::new(map.clone());
        plain.insert_entry("default_factory", thing.clone());
        let plain = graph.alloc(plain);
        let root = graph.alloc(vec![plain, thing]);
        assert!(matches!(
            encode(&graph, &root),
            Err(Error::ReservedKey(key)) if key == "default_factory"
        ));

        let mut lookup = Instance::new(ty(&registry, "pkg.Lookup"));
        lookup.insert_entry("default_factory", Value::Int(1));
        let root = graph.alloc(lookup);
        assert_eq!(encode_ok(&graph, &root), r#"{"default_factory":1,"type":"pkg.Lookup"}"#);

        let mut blob = Instance::new(ty(&registry, "pkg.Blob")).with_attr("ignored", 1);
        blob.store_state(Value::from("payload"));
        let root = graph.alloc(blob);
        assert_eq!(encode_ok(&graph, &root), r#"{"state":"payload","type":"pkg.Blob"}"#);
    }

    #[test]
    fn opaque_values_need_handlers() {
        let mut graph = Graph::new();
        let root = graph.alloc(Object::opaque(Duration::from_millis(1500)));
        assert_eq!(
            encode_ok(&graph, &root),
            r#"{"nanos":500000000,"secs":1,"type":"core.time.Duration"}"#,
        );

        let root = graph.alloc(Object::opaque(Celsius(21.5)));
        assert_eq!(encode_ok(&graph, &root), r#"{"type":"units.Celsius","value":21.5}"#);

        #[derive(Debug, PartialEq)]
        struct Socket;
        crate::impl_type_path!(Socket => "pkg.Socket");
        let root = graph.alloc(Object::opaque(Socket));
        assert!(matches!(encode(&graph, &root), Err(Error::MissingHandler(path)) if path == "pkg.Socket"));
    }

    #[test]
    fn raw_data_passes_through() {
        let mut graph = Graph::new();
        let raw = parse(r#"{"type": "nope.X", "a": 1}"#);
        let object = graph.alloc(Object::Raw(raw.clone()));
        let root = graph.alloc(vec![Value::Raw(raw), object.clone(), object]);
        assert_eq!(
            encode_ok(&graph, &root),
            r#"[{"a":1,"type":"nope.X"},{"a":1,"type":"nope.X"},{"id":1}]"#,
        );
    }

    #[test]
    fn deterministic_output() {
        let mut graph = Graph::new();
        let set = graph.alloc(ValueSet::from_iter((0..64).map(Value::Int)));
        let root = graph.alloc(vec![set]);
        assert_eq!(encode_ok(&graph, &root), encode_ok(&graph, &root));
    }

    #[test]
    fn errors() {
        let registry = registry();
        let handlers = handlers();
        let config = Config::builder().max_depth(3).build();
        let codec = Codec::with_config(&registry, &handlers, config).unwrap();

        let mut graph = Graph::new();
        let a = graph.alloc(vec![Value::Int(1)]);
        let b = graph.alloc(vec![a]);
        let c = graph.alloc(vec![b.clone()]);
        assert!(codec.flatten(&graph, &b).is_ok());
        assert!(matches!(codec.flatten(&graph, &c), Err(Error::DepthLimit(3))));

        for float in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let root = graph.alloc(vec![Value::Int(1), Value::Tuple(vec![Value::Float(float)])]);
            assert!(matches!(codec.flatten(&graph, &root), Err(Error::NonFiniteFloat(_))));
        }
        assert!(codec.flatten(&graph, &Value::Float(f64::MAX)).is_ok());

        let dangling = Value::Ref(Graph::new().insert(Object::List(Vec::new())));
        assert!(matches!(codec.flatten(&Graph::new(), &dangling), Err(Error::UnknownObject(_))));
    }
}
