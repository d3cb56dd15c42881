#![deny(warnings)]

pub mod display;
pub mod error;
pub mod session;
