pub mod session;
mod store;
mod types;

pub use session::{issue_session, resolve_session, revoke_session, SessionError};
pub use store::{create_user, get_user, UserStoreError};
pub use types::User;
