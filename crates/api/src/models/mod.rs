//! Domain models for the catalog.
//!
//! Row types double as response bodies: their `Serialize` output is the JSON
//! shape clients see.

pub mod category;
pub mod product;

pub use category::{
    Category, CategoryChanges, CategoryWithProducts, CreateCategory, NewCategory, UpdateCategory,
};
pub use product::Product;
