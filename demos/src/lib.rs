//! Shared helpers for the demo programs: a synthetic CT phantom and an OBJ
//! writer.

pub mod obj;
pub mod phantom;

pub use obj::{format_significant, write_obj, ObjWriter};
pub use phantom::{ct_phantom, PhantomRegion};
