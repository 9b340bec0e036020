//! Small timing helpers shared across the crate.

mod debounce;
mod multi_click;

pub use debounce::ChangeDebounce;
pub use multi_click::MultiClickDetector;
