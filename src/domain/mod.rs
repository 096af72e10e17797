pub mod artifact;
pub mod dialogue;
pub mod podcast;
pub mod shared;
pub mod synthesis;
