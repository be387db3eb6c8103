use super::Backend;
use crate::Error;
use crate::document::Node;

/// JSON through `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend {
    pretty: bool,
}

impl JsonBackend {
    /// Output without whitespace.
    #[inline]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    #[inline]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Backend for JsonBackend {
    fn name(&self) -> &'static str {
        if self.pretty { "json-pretty" } else { "json" }
    }

    fn serialize(&self, document: &Node) -> Result<Vec<u8>, Error> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        Ok(bytes)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Node, Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
