#![allow(missing_docs)]

#[path = "../fixtures/mod.rs"]
mod fixtures;

mod build;
mod inspect;
mod write;
