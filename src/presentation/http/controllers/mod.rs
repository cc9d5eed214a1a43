// src/presentation/http/controllers/mod.rs
pub mod errors;
pub mod people;
