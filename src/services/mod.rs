//! Application services: the request-level operations shared by the HTTP
//! server and the CLI. Every operation takes a [`crate::context::ServiceContext`]
//! and reaches the outside world only through its ports.

pub mod analytics;
pub mod links;
pub mod profiles;
pub mod theme;
pub mod uploads;
pub mod username;
pub mod vcard;
