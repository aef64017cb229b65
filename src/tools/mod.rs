pub mod discover;
pub mod find;

pub use discover::*;
pub use find::*;
