pub mod inspect;
pub mod orchestrator;
pub mod snapshot_model;
pub mod traversal;
pub mod visibility;
