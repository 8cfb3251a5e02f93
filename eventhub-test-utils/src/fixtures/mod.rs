//! Test fixture modules for database rows, mock endpoints and provider payloads.
//!
//! - `catalog` - provider and catalog rows inserted straight through SeaORM
//! - `factory` - provider resource payloads in the shapes providers publish
//! - `mockito` - mock provider resource endpoints

pub mod catalog;
pub mod factory;
pub mod mockito;
