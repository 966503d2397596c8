//! Memory model shared by the analyzer and the interpreter
//!
//! - [`scope`]: Arena of lexical frames with parent links, generic over the
//!   variable and function bindings each pass stores
//! - [`value`]: Runtime value representation
//!
//! # Frames
//!
//! Every function body, `IF`/`ELSE` branch, `SWITCH` case and `WHILE`
//! iteration runs in its own frame. Frames are pushed and popped in LIFO
//! order; lookups follow parent links, so a function body resolves names in
//! the frame it was defined in rather than in its caller.

pub mod scope;
pub mod value;

pub use scope::{FrameId, Scope};
pub use value::Value;
