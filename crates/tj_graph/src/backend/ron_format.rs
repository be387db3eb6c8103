use super::Backend;
use crate::Error;
use crate::document::Node;

/// RON through the `ron` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RonBackend;

impl Backend for RonBackend {
    fn name(&self) -> &'static str {
        "ron"
    }

    fn serialize(&self, document: &Node) -> Result<Vec<u8>, Error> {
        Ok(ron::ser::to_string(document)?.into_bytes())
    }

    fn parse(&self, bytes: &[u8]) -> Result<Node, Error> {
        let text = core::str::from_utf8(bytes)?;
        Ok(ron::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::RonBackend;
    use crate::backend::Backend;
    use crate::document::Node;

    #[test]
    fn reads_back() {
        let document: Node =
            serde_json::from_str(r#"{"things": [{"type": "pkg.Thing", "n": 1, "x": 0.5}]}"#)
                .unwrap();
        let bytes = RonBackend.serialize(&document).unwrap();
        assert_eq!(RonBackend.parse(&bytes).unwrap(), document);
        assert!(RonBackend.parse(&[0xff]).is_err());
    }
}
