//! SeaORM entities, one module per table.

pub mod course;
pub mod enrollment;
pub mod feedback;
pub mod user;
