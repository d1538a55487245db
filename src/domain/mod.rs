mod bank;
mod holder;
mod money;
mod transaction;

pub use bank::*;
pub use holder::*;
pub use money::*;
pub use transaction::*;
