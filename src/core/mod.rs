// src/core/mod.rs

pub mod net;
pub mod sanitize;
pub mod xml;

pub use net::{DirFetcher, DocumentFetcher, HttpFetcher};
pub use xml::{Document, Node, NodeKind, Visit};
