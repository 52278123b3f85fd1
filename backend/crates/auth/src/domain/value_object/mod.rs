//! Value Object Module

pub mod operator_id;
pub mod operator_role;
