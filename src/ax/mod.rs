pub mod attr_model;
pub mod backend;
pub mod fixture;
