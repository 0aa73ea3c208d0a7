pub mod hash;
pub mod jwt;
pub mod range;
