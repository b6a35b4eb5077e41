pub mod compare;
pub mod layers;
