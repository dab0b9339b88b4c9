mod object_store;

pub use object_store::{ObjectInfo, ObjectStore, StoreLocation, DEFAULT_LIST_LIMIT};
