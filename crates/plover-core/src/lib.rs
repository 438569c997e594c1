pub mod dom;
pub mod error;
pub mod model;
pub mod table;
pub mod wait;

pub use error::{Error, Result};
pub use model::{Batch, CategoryLink, Lead};
