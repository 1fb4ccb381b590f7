//! Azure Resource Manager access.
//!
//! - [`auth`] - access tokens (service principal or az cli)
//! - [`cli`] - running `az` commands
//! - [`rest`] - [`ArmClient`] and [`ArmResponse`]
//! - [`resources`], [`network`], [`storage`], [`compute`], [`insights`] - one function per ARM call

pub mod auth;
mod cli;
pub mod compute;
pub mod insights;
pub mod network;
pub mod resources;
mod rest;
pub mod storage;

pub use auth::{get_access_token, get_access_token_cli, token_for, TokenSource};
pub use rest::{ArmClient, ArmResponse};
