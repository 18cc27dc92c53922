//! Configuration module

mod site;

pub use site::ApiConfig;
pub use site::Experience;
pub use site::HighlightConfig;
pub use site::MenuItem;
pub use site::ProfileConfig;
pub use site::ProfileLink;
pub use site::ServiceCard;
pub use site::SiteConfig;
pub use site::API_BASE_URL_ENV;
