pub mod format;
pub mod protocol;

pub use format::*;
pub use protocol::*;
