pub mod integer;
pub mod source;

pub use rand_core::OsError;
pub use source::{os_seed, Source};
