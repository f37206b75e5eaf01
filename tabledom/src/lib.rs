pub mod element;
pub mod handle;
pub mod render;
pub mod text;

pub use element::{Content, Element, Tag};
pub use handle::ElementRef;
pub use render::{render_lines, TextLayout};
