pub mod browser;
pub mod categories;
pub mod completion;
pub mod leads;
