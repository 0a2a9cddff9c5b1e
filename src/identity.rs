//! Kernel identity probing.
//!
//! The identity is a snapshot of the `uname(2)` fields a program would look at
//! to decide which operating system it runs on. It is taken once, when the
//! sequence starts.

use crate::{Error, Result, sys::Kernel};
use std::borrow::Cow;
use tracing::debug;

/// Identity reported by the kernel to the calling process.
///
/// Fields hold the raw bytes of the corresponding `utsname` field, without
/// the terminating NUL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub sysname: Vec<u8>,
    pub release: Vec<u8>,
    pub machine: Vec<u8>,
}

impl Identity {
    /// Identity with only the system name known.
    pub fn named(sysname: impl Into<Vec<u8>>) -> Self {
        Self {
            sysname: sysname.into(),
            ..Self::default()
        }
    }

    pub fn sysname(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.sysname)
    }

    /// Whether the system name is exactly `label`.
    ///
    /// Compares `label` plus its terminating NUL against the field, byte for
    /// byte, stopping at the first NUL on either side. Any difference in
    /// length, content or case is a mismatch.
    pub fn sysname_matches(&self, label: &str) -> bool {
        let expected = label.bytes().chain(std::iter::once(0));
        for (i, want) in expected.enumerate() {
            let got = self.sysname.get(i).copied().unwrap_or(0);
            if got != want {
                return false;
            }
            if got == 0 {
                break;
            }
        }
        true
    }
}

/// Query the identity the kernel currently reports.
pub fn probe_identity<K: Kernel + ?Sized>(kernel: &K) -> Result<Identity> {
    let identity = kernel.query_identity().map_err(Error::Query)?;
    debug!(
        sysname = %identity.sysname(),
        release = %String::from_utf8_lossy(&identity.release),
        machine = %String::from_utf8_lossy(&identity.machine),
        "probed kernel identity"
    );
    Ok(identity)
}

/// Copy a NUL-terminated `utsname` field.
pub(crate) fn field_bytes(field: &[libc::c_char]) -> Vec<u8> {
    field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect()
}
