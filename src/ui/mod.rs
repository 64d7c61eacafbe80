pub mod icons;
pub mod table;

pub use table::listing;
