pub mod project;
pub mod technology;
