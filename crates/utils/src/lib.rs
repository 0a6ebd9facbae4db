pub mod filename;
pub mod key;

pub use filename::*;
pub use key::*;
