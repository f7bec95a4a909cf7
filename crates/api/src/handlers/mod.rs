pub mod locations;
pub mod pets;
