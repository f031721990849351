//! # Mini LinkedIn profile service
//!
//! User profiles for a small social network, in three pieces:
//!
//! - **User service** - an actor owns every [`UserRecord`](domain::UserRecord) and writes
//!   through to a [`DocumentStore`](store::DocumentStore); [`UserClient`](clients::UserClient)
//!   is the only way in, and [`http`] puts it on the network.
//! - **API proxy** - [`proxy`] forwards `GET`/`PUT /api/users/:id` to the service and
//!   relays its errors.
//! - **Profile cache** - [`profile_cache`] holds the signed-in user's profile for a
//!   session and works out what avatar to show.
//!
//! ## Expected Tracing Output
//!
//! ```text
//! INFO mini_linkedin: Starting user profile service
//! WARN mini_linkedin::app_system::profile_system: DATA_PATH not set, user records are kept in memory only
//! INFO mini_linkedin::actor_framework: ResourceActor starting documents=0
//! DEBUG upsert_profile{identity_key="u1"}: Sending request
//! INFO mini_linkedin::http::routes: Profile upserted identity_key="u1"
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod http;
pub mod profile_cache;
pub mod proxy;
pub mod store;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
