//! Session state: durable token/profile storage, the user-data cache and
//! account operations built on top of them.

pub mod account;
pub mod mirror;
pub mod store;
pub mod user_data;

pub use account::AccountService;
pub use mirror::{ChangeTicket, FetchTicket, IdMirror};
pub use store::{SessionStore, TOKEN_KEY, USER_DATA_KEY};
pub use user_data::{CacheState, UserDataCache};
