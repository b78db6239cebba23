pub mod branding;
pub mod constants;
pub mod settings;

pub use branding::{resolve_label, Branding};
pub use settings::current_branding;
