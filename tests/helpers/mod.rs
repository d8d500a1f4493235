#![allow(dead_code)]

pub mod context_assertions;
pub mod source_fixtures;
