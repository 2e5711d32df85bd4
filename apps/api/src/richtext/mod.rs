// Rich text: a tree of blocks holding marked text runs, stored as a JSON string.
// A stored value that does not decode to a tree is kept as literal text.

pub mod codec;
pub mod handlers;
pub mod node;
pub mod render;
pub mod selection;
pub mod transforms;

pub use codec::{load_for_editing, parse, serialize};
pub use node::{Align, BlockKind, Mark};
pub use render::content_html;
pub use selection::Range;
pub use transforms::{set_align, set_block_kind, toggle_mark};
