pub mod criteria;
pub mod listing;
pub mod result;

pub use criteria::*;
pub use listing::*;
pub use result::*;
