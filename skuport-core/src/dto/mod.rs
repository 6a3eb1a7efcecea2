//! Wire DTOs for the importer API

pub mod import;
