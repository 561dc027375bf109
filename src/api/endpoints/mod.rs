//! API endpoint handlers.
//!
//! `meta` serves the root, about and health routes, `predict` the premium
//! classifier, `patients` the record CRUD.

pub mod meta;
pub mod patients;
pub mod predict;
