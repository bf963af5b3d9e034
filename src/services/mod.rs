// Service exports
pub mod catalog;
pub mod drafts;
pub mod session;
pub mod store;

pub use catalog::{CatalogError, CatalogSource, CatalogStore};
pub use drafts::{Autosave, DraftStore};
pub use session::{SessionError, SessionStore, SessionUser, User};
pub use store::{KeyValueStore, MemoryStore, StoreError};
