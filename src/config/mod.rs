//! Configuration module

mod site;

pub use site::AnalyticsConfig;
pub use site::ContactConfig;
pub use site::ContentConfig;
pub use site::SiteConfig;
