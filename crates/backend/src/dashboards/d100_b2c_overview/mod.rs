pub mod service;
pub mod store;

pub use store::{OrderRecord, OrderStore, StoreError};
