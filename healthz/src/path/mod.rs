//! Path expressions for addressing components.
//!
//! # Syntax Overview
//!
//! Full pattern: `/segment/segment/...`
//!
//! - **Plain segment**: `name`
//! - **Keyed segment**: `name[key=value]`
//! - **Quoted values**: `name[key='a b']` or `name[key="a b"]`
//!
//! Empty segments are skipped, so `""`, `"/"` and `"//"` all address the
//! root. Segments that do not fit the keyed form are kept verbatim as
//! plain names.

mod parser;

pub use parser::{parse_path, scan_segment, Path, PathElement, Segment};
