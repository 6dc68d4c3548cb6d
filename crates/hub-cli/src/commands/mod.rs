pub mod add;
pub mod auth;
pub mod delete;
pub mod dispatch;
pub mod edit;
pub mod export;
pub mod facets;
pub mod favorite;
pub mod import;
pub mod list;
pub mod open;
pub mod share;
pub mod shared;
