pub mod directory;
pub mod availability;
pub mod source;

pub use directory::ProviderDirectory;
pub use availability::AvailabilityCalendar;
pub use source::{HttpProviderSource, ProviderSource};
