#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use battery_map as map;
pub use battery_utils as utils;
