//! Client for the remote DLP service
//!
//! [`DlpService`] is the seam the tools program against; [`DlpClient`] is
//! the DLP v2 REST implementation.

pub mod auth;
pub mod client;
pub mod error;
pub mod service;
pub mod wire;

pub use auth::{CredentialSources, Credentials, Env, ProcessEnv};
pub use client::{ClientOptions, DlpClient};
pub use error::{DlpError, Result};
pub use service::{
    DeidentifyRequest, DlpService, ImageRedactionTarget, InspectRequest, InspectSettings,
    RedactImageRequest,
};
