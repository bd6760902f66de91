//! Utility modules shared by the renderer and the dashboard pages
//!
//! - Color: hex parsing and lightening for ring shading
//! - Text: XML escaping and label truncation

pub mod color;
pub mod text;

pub use color::{lighten_hex, Rgb};
pub use text::{escape_xml, truncate_label};
