//! Personality toggle.
//!
//! Kernels that can pass as Linux expose a vendor `prctl(2)` option for it.
//! The request is only issued when the probed identity is not already the
//! target one: a kernel that is Linux, or already mocking it, may not support
//! the option at all.

use crate::{Error, Identity, Result, sys::Kernel};
use tracing::{debug, trace};

/// `prctl` option: Maestro-specific subcommands ("MSTR").
pub const PR_MAESTRO: libc::c_int = 0x4d535452;

/// `PR_MAESTRO` subcommand: pretend to be Linux.
pub const PR_MAESTRO_LINUX: libc::c_ulong = 0;

/// System name programs expect when running on Linux.
pub const LINUX_LABEL: &str = "Linux";

/// A request to the kernel to report another identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalityRequest {
    /// System name the calling process must observe afterwards
    pub label: String,
    /// `prctl` option identifying the control channel
    pub channel: libc::c_int,
    /// Subcommand on the channel
    pub subcommand: libc::c_ulong,
    /// Activation parameter; non-zero enables the identity
    pub activation: libc::c_ulong,
}

impl Default for PersonalityRequest {
    fn default() -> Self {
        Self {
            label: LINUX_LABEL.to_string(),
            channel: PR_MAESTRO,
            subcommand: PR_MAESTRO_LINUX,
            activation: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The kernel already reports the target identity.
    Skip,
    /// The personality request must be issued.
    Toggle,
}

/// Decide whether `current` needs the personality request to become `label`.
pub fn decide(current: &Identity, label: &str) -> Decision {
    if current.sysname_matches(label) {
        Decision::Skip
    } else {
        Decision::Toggle
    }
}

/// Make sure the kernel reports `request.label` to the calling process.
///
/// Issues at most one request. A rejected request is an error: the caller
/// must not go on with an identity it cannot vouch for.
pub fn ensure_identity<K: Kernel + ?Sized>(
    kernel: &K,
    current: &Identity,
    request: &PersonalityRequest,
) -> Result<Decision> {
    let decision = decide(current, &request.label);
    match decision {
        Decision::Skip => {
            trace!(sysname = %current.sysname(), "identity already matches, skipping request");
        }
        Decision::Toggle => {
            debug!(
                sysname = %current.sysname(),
                channel = request.channel,
                subcommand = request.subcommand,
                activation = request.activation,
                "requesting personality"
            );
            kernel.request_personality(request).map_err(Error::Toggle)?;
        }
    }
    Ok(decision)
}
