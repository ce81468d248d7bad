mod arena;
mod handle;
mod node;
mod raw_bst;

pub(crate) use arena::Generation;
pub(crate) use handle::Handle;
pub(crate) use node::Node;
pub(crate) use raw_bst::RawBst;
