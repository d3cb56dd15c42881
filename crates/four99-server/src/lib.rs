#![deny(warnings)]

pub mod acceptor;
pub mod connection;
pub mod decks;
pub mod error;
pub mod registry;
pub mod session;
