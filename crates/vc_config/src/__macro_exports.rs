//! Items referenced by generated code.

pub use alloc::boxed::Box;
pub use alloc::vec::Vec;
pub use core::any::Any;
pub use core::result::Result;

pub use vc_node::ConfigNode;

#[cfg(feature = "auto_register")]
pub use inventory;
