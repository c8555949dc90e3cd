mod arena;
mod handle;
mod node;
mod raw_os_bag;
mod size;

pub(crate) use raw_os_bag::{Iter, RawOSBag};
