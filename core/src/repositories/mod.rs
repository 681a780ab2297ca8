pub mod kv;
pub mod otp_store;

pub use kv::{InMemoryKeyValueStore, KeyValueStore};
pub use otp_store::OtpStoreRepository;
