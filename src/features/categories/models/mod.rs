mod category;

pub use category::{Category, CategoryTreeRow};
