//! Per-field fallback chains. Each submodule exposes its `CHAIN` of
//! strategies and an `extract` that runs it.

pub mod brand;
pub mod category;
pub mod image;
pub mod ingredients;
pub mod name;
pub mod size;
mod table;
