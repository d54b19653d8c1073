//! Request handlers

pub mod status;
