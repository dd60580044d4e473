//! Parser for placement descriptors

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{
    parse_anchor_spec, parse_length, parse_offset, parse_origin_spec, parse_transform,
    parse_transform_origin,
};
