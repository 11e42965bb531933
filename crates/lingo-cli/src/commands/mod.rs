//! Command implementations.

pub mod conversation;
pub mod exam;
pub mod login;
pub mod logout;
pub mod questions;
pub mod register;
pub mod verify;
pub mod whoami;
