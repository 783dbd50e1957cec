#![allow(non_snake_case)]

pub mod api;
pub mod auth;
pub mod bulletins;
pub mod config;
pub mod contact;
pub mod error;
pub mod guard;
pub mod listing;
pub mod navigate;
pub mod products;
pub mod screen;
pub mod session;
pub mod storage;
pub mod users;

pub use api::ApiClient;
pub use auth::{landing_path, SessionStore};
pub use config::ClientConfig;
pub use error::ClientError;
pub use guard::{AdminSection, GuardDecision, RouteGuard};
pub use listing::{paginate, Filter, Page};
pub use navigate::Navigator;
pub use screen::CrudScreen;
pub use session::{Session, SessionContext};
pub use storage::KeyValueStore;
