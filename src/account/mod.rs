mod errors;
mod memory;
mod store;
mod types;

pub use errors::AccountError;
pub use memory::MemoryAccountStore;
pub use store::AccountStore;
pub use types::{QualifiedUserId, Threepid};
