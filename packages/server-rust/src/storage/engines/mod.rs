//! In-process [`ClientStore`](crate::traits::ClientStore) implementations.

mod hashmap;

pub use hashmap::HashMapClientStore;
