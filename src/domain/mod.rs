pub mod listing;
pub mod outcome;
pub mod product;
pub mod site;

pub use listing::ListingResult;
pub use outcome::{Outcome, Status};
pub use product::{Availability, ProductRecord, SpecEntry};
pub use site::{ElementRule, PageKind, SiteProfile, SiteSelectors};
