//! Authentication module: OAuth redirect login through Supabase
//!
//! Provides:
//! - The closed set of accepted identity providers (`provider` submodule)
//! - The Supabase OAuth sign-in client (`supabase` submodule)
//! - Login initiation producing a redirect or a failure (`login` submodule)

pub mod login;
pub mod provider;
pub mod supabase;
