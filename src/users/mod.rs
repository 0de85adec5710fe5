mod memory;
mod repo;
mod repo_types;

pub use memory::InMemoryUserStore;
pub use repo::{PgUserStore, StoreError, UserStore};
pub use repo_types::{NewUser, PublicUser, User};
