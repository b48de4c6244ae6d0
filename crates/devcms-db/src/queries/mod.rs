//! Database query implementations.

pub mod catalog;
pub mod pages;
pub mod posts;
pub mod products;
pub mod sites;
pub mod taxonomy;
