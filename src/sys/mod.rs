//! Platform-specific system interfaces.
//!
//! The sequence only needs three things from the kernel, gathered in the
//! [`Kernel`] trait. The host implementation is conditionally compiled based
//! on the target OS and re-exported at the module level.

use crate::{Identity, PersonalityRequest};
use std::ffi::OsString;
use std::io;

#[cfg(unix)]
pub mod unix;

#[cfg(unix)]
pub use unix::HostKernel;

/// Kernel capabilities used by the probe, toggle and transfer sequence.
pub trait Kernel {
    /// Identity currently reported to the calling process.
    fn query_identity(&self) -> io::Result<Identity>;

    /// Ask the kernel to report `request.label` to the calling process and
    /// its descendants.
    fn request_personality(&self, request: &PersonalityRequest) -> io::Result<()>;

    /// Replace the process image with `argv[0]`, passing `argv` and the
    /// inherited environment.
    ///
    /// Only returns on failure, with the reason.
    fn exec(&self, argv: &[OsString]) -> io::Error;
}
