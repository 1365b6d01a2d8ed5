pub mod ordering;
pub mod resource;
pub mod timestamp;
