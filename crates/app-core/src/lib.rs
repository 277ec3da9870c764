//! Core logic for Terabox Viewer
//!
//! This crate contains the link resolver that turns pasted TeraBox sharing
//! links into embeddable video descriptions.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod resolver;

pub use resolver::{
    resolve, supported_formats, EmbedStrategy, LinkResolver, LinkShape, ResolvedVideo,
    TeraboxResolver, ValidationError, LINK_SHAPES,
};
