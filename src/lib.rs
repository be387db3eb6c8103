#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use tj_graph as graph;
pub use tj_utils as utils;

pub use tj_graph::{Codec, Config, Error, LegacyRepr};
