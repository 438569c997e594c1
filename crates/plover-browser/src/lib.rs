mod chrome_finder;
mod error;
mod launcher;
mod page;
mod profile;
mod session;

pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use launcher::LaunchOptions;
pub use page::{CdpElement, CdpPage};
pub use profile::ProfileManager;
pub use session::BrowserSession;
