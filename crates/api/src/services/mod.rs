//! Business logic that spans more than one store call.

pub mod categories;
