pub mod aggregate;
pub mod derive;
