mod local_store;
mod mock_store;

pub use local_store::LocalStagingStore;
pub use mock_store::MockStagingStore;
