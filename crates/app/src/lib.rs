//! Shelf label application: saved collection, exports and the workbench.

pub mod config;
pub mod context;
pub mod domain;
pub mod exports;
pub mod generator;
pub mod storage;
pub mod uuids;
pub mod workbench;

#[cfg(test)]
mod test;
