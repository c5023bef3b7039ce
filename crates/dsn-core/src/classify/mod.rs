//! Pure lookup tables and mappings applied to reconstructed employees.

pub mod age;
pub mod category;
pub mod remuneration;

pub use age::{age_at, index_bracket, pyramid_band};
pub use category::category_for_status;
pub use remuneration::remuneration_label;
