// Library root
// -----------
// This crate exposes the provisioning flow as a library so the binary
// (`main.rs`) stays a thin wrapper and the flow can be driven from tests
// without a terminal.
//
// Module responsibilities:
// - `digest`: the fixed credential hash (SHA-384 over password + name).
// - `record`: one `digest;username` line of the credential store.
// - `store`: filesystem boundaries (credential file, user directories).
// - `ui`: console prompts built on `dialoguer`.
// - `provision`: the three phases (bootstrap, registration, directories).
// - `config`: paths used by the flow.
// - `error`: the library error type.
pub mod config;
pub mod digest;
pub mod error;
pub mod provision;
pub mod record;
pub mod store;
pub mod ui;

pub use config::Settings;
pub use error::{ProvisionError, Result};
pub use provision::{Outcome, ProvisionReport, Provisioner};
