use tj_utils::hash::HashMap;

use super::{Dict, Graph, Instance, ObjId, Object, Value, ValueSet};

impl Graph {
    /// Structural equality of `a` in `self` and `b` in `other`.
    ///
    /// Two values are equal when their scalars, types and contents match
    /// and their references form the same shape: an object shared twice in
    /// one graph must be shared in the same positions in the other, and
    /// cycles must close on corresponding objects. Object ids themselves
    /// need not match.
    ///
    /// ```
    /// use tj_graph::graph::{Graph, Object, Value};
    ///
    /// let mut left = Graph::new();
    /// let a = left.insert(Object::List(Vec::new()));
    /// left.list_mut(a).unwrap().push(Value::Ref(a));
    ///
    /// let mut right = Graph::new();
    /// right.insert(Object::List(Vec::new())); // shifts the ids
    /// let b = right.insert(Object::List(Vec::new()));
    /// right.list_mut(b).unwrap().push(Value::Ref(b));
    ///
    /// assert!(left.structurally_eq(&Value::Ref(a), &right, &Value::Ref(b)));
    /// ```
    pub fn structurally_eq(&self, a: &Value, other: &Graph, b: &Value) -> bool {
        Matcher {
            left: self,
            right: other,
            forward: HashMap::default(),
            backward: HashMap::default(),
        }
        .values(a, b)
    }
}

/// Tracks the bijection between the objects of two graphs.
struct Matcher<'a> {
    left: &'a Graph,
    right: &'a Graph,
    forward: HashMap<ObjId, ObjId>,
    backward: HashMap<ObjId, ObjId>,
}

impl Matcher<'_> {
    fn values(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Ref(x), Value::Ref(y)) => self.objects(*x, *y),
            (Value::Ref(_), _) | (_, Value::Ref(_)) => false,
            (Value::Tuple(x), Value::Tuple(y)) => self.sequences(x, y),
            (Value::Record(x), Value::Record(y)) => {
                x.ty().path() == y.ty().path() && self.sequences(x.values(), y.values())
            }
            _ => a == b,
        }
    }

    fn sequences(&mut self, a: &[Value], b: &[Value]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| self.values(x, y))
    }

    fn dicts(&mut self, a: &Dict, b: &Dict) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|((ka, va), (kb, vb))| ka == kb && self.values(va, vb))
    }

    fn sets(&mut self, a: &ValueSet, b: &ValueSet) -> bool {
        if a.len() != b.len() {
            return false;
        }
        let mut unmatched: Vec<&Value> = Vec::new();
        for member in a {
            if contains_ref(member) {
                unmatched.push(member);
            } else if !b.contains(member) {
                return false;
            }
        }
        let mut candidates: Vec<&Value> = b.iter().filter(|m| contains_ref(m)).collect();
        if candidates.len() != unmatched.len() {
            return false;
        }
        // Greedy matching; a failed attempt rolls the bijection back.
        for member in unmatched {
            let position = candidates.iter().position(|candidate| {
                let snapshot = (self.forward.clone(), self.backward.clone());
                let found = self.values(member, candidate);
                if !found {
                    (self.forward, self.backward) = snapshot;
                }
                found
            });
            match position {
                Some(index) => {
                    candidates.swap_remove(index);
                }
                None => return false,
            }
        }
        true
    }

    fn instances(&mut self, a: &Instance, b: &Instance) -> bool {
        let same_factory = match (a.factory(), b.factory()) {
            (Some(x), Some(y)) => x.path() == y.path(),
            (None, None) => true,
            _ => false,
        };
        let same_state = match (a.stored_state(), b.stored_state()) {
            (Some(x), Some(y)) => self.values(x, y),
            (None, None) => true,
            _ => false,
        };
        a.type_path() == b.type_path()
            && same_factory
            && same_state
            && self.dicts(a.attrs(), b.attrs())
            && self.sequences(a.items(), b.items())
            && self.sets(a.members(), b.members())
            && self.dicts(a.entries(), b.entries())
    }

    fn objects(&mut self, x: ObjId, y: ObjId) -> bool {
        match (self.forward.get(&x), self.backward.get(&y)) {
            (Some(&fx), Some(&by)) => return fx == y && by == x,
            (None, None) => {}
            _ => return false,
        }
        self.forward.insert(x, y);
        self.backward.insert(y, x);

        let (Some(l), Some(r)) = (self.left.get(x), self.right.get(y)) else {
            return false;
        };
        match (l, r) {
            (Object::List(a), Object::List(b)) => self.sequences(a, b),
            (Object::Dict(a), Object::Dict(b)) => self.dicts(a, b),
            (Object::Set(a), Object::Set(b)) => self.sets(a, b),
            (Object::Instance(a), Object::Instance(b)) => self.instances(a, b),
            (Object::Opaque(a), Object::Opaque(b)) => a.opaque_eq(b.as_ref()),
            (Object::Raw(a), Object::Raw(b)) => a == b,
            _ => false,
        }
    }
}

fn contains_ref(value: &Value) -> bool {
    match value {
        Value::Ref(_) => true,
        Value::Tuple(items) => items.iter().any(contains_ref),
        Value::Record(record) => record.values().iter().any(contains_ref),
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// Tests
