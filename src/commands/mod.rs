pub mod split;
pub mod status;
pub mod structure;
