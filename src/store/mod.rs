// Gateway module for the state store - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod persist;
mod slices;
mod store;

// Public re-exports - the ONLY way to access store functionality
pub use persist::Persistor;
pub use slices::{ActivitySlice, AuthSlice, StoreState};
pub use store::StateStore;
