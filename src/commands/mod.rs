pub mod plot;
pub mod validate;

pub use plot::plot;
pub use validate::validate;
