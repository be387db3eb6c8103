use tj_utils::hash::HashMap;

use crate::graph::Value;

// -----------------------------------------------------------------------------
// ReferenceTable

/// Objects registered during one decode call, indexed by `id` tags.
#[derive(Debug, Default)]
pub(crate) struct ReferenceTable {
    entries: Vec<Value>,
}

impl ReferenceTable {
    #[inline]
    pub(crate) fn push(&mut self, value: Value) {
        self.entries.push(value);
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&Value> {
        self.entries.get(index)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

// -----------------------------------------------------------------------------
// NameStack

/// Attribute paths of registered objects, for legacy `ref` tags.
///
/// The stack grows only for dict keys and instance attributes, so list
/// and set elements share the path of their container. A later
/// registration under the same path replaces the earlier one.
#[derive(Debug, Default)]
pub(crate) struct NameStack {
    names: Vec<String>,
    paths: HashMap<String, Value>,
}

impl NameStack {
    #[inline]
    pub(crate) fn push(&mut self, name: &str) {
        self.names.push(name.to_owned());
    }

    #[inline]
    pub(crate) fn pop(&mut self) {
        self.names.pop();
    }

    /// `/` followed by the names joined with `/`.
    pub(crate) fn path(&self) -> String {
        let mut path = String::from("/");
        path.push_str(&self.names.join("/"));
        path
    }

    /// Binds the current path to `value`.
    pub(crate) fn bind(&mut self, value: Value) {
        let path = self.path();
        self.paths.insert(path, value);
    }

    #[inline]
    pub(crate) fn lookup(&self, path: &str) -> Option<&Value> {
        self.paths.get(path)
    }
}

#[cfg(test)]
mod tests {
    use super::NameStack;
    use crate::graph::Value;

    #[test]
    fn paths() {
        let mut names = NameStack::default();
        assert_eq!(names.path(), "/");
        names.bind(Value::Int(0));

        names.push("a");
        names.push("b");
        assert_eq!(names.path(), "/a/b");
        names.bind(Value::Int(1));
        names.bind(Value::Int(2));
        names.pop();
        assert_eq!(names.path(), "/a");

        assert_eq!(names.lookup("/"), Some(&Value::Int(0)));
        assert_eq!(names.lookup("/a/b"), Some(&Value::Int(2)));
        assert_eq!(names.lookup("/a"), None);
    }
}
