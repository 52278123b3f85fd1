//! Entity Module

pub mod operator;
