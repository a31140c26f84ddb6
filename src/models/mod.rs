pub mod bucket;
pub mod record;
pub mod summary;

pub use bucket::*;
pub use record::*;
pub use summary::*;
