//! Page sections built on the runtime
//!
//! - `content` - Static ordered content supplied at mount time
//! - `presets` - Viewport-triggered entrance animations
//! - `services` / `reviews` / `portfolio` - One view per section
//! - `page` - Layout and event routing for the whole page
//! - `scenario` - Scripted replays on a virtual clock

pub mod content;
pub mod page;
pub mod portfolio;
pub mod presets;
pub mod reviews;
pub mod scenario;
pub mod services;

pub use content::{Project, ProjectPair, Review, Service, SiteContent};
pub use page::Page;
pub use portfolio::PortfolioSection;
pub use presets::RevealPreset;
pub use reviews::ReviewsSection;
pub use scenario::{PreviewSample, Sample, Scenario, Simulator, Step};
pub use services::ServicesSection;
