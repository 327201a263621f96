//! Configuration section definitions.
//!
//! Each module corresponds to a section in `ctrm.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `booking`  | `[booking]`    | Embedded order form, resize bridge   |
//! | `build`    | `[build]`      | Output directory                     |
//! | `pages`    | `[[pages]]`    | Routed pages and their SEO inputs    |
//! | `site`     | `[site]`       | Site root URL, OG locale             |
//! | `store`    | `[store]`      | Content store backend                |

mod booking;
mod build;
mod pages;
mod site;
mod store;

pub use booking::BookingConfig;
pub use build::BuildSectionConfig;
pub use pages::{PageConfig, validate_pages};
pub use site::SiteSectionConfig;
pub use store::{StoreConfig, StoreProvider};
