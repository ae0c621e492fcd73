//! Text processing
//!
//! Markup parsing and layout. Nothing here touches the GPU.

pub mod layout;
pub mod markup;

pub use layout::{GlyphPlacement, LayoutParams, TextBounds, TextLayout};
pub use markup::{parse_markup, strip_markup, StyledRun};
