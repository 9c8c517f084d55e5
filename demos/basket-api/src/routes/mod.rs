pub mod basket;
pub mod products;
pub mod stores;
