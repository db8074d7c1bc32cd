pub mod hasher;
pub mod path;
