pub mod user_listing;

pub use user_listing::{AdminUserLister, ListUsersError};
