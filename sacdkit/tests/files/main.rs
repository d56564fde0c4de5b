#![allow(missing_docs)]

#[path = "../fixtures/mod.rs"]
mod fixtures;

mod dff;
mod dsf;
