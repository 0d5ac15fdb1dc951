//! Commands Layer
//!
//! Mutation entry points bridging the render layer to the item store.

mod item_cmd;

pub use item_cmd::*;
