//! mocklinux - run a command while the kernel reports a Linux identity.
//!
//! Some kernels can pass as Linux to programs that branch on the system name
//! returned by `uname(2)`. This crate asks the kernel to do so for the calling
//! process and then replaces the process image with the requested command, so
//! the command (and its descendants) observe the Linux identity.
//!
//! The sequence is strictly ordered and one-shot:
//!
//! 1. [`identity`] - probe the identity the kernel currently reports
//! 2. [`personality`] - request the Linux personality, unless already reported
//! 3. [`transfer`](mod@transfer) - replace the process image with the target command
//!
//! All kernel access goes through the [`sys::Kernel`] trait. The host
//! implementation lives in [`sys`]; tests substitute their own.
//!
//! # Error Handling
//!
//! Every step fails into the consolidated [`Error`] type. None of the failures
//! are recoverable: the caller reports the error once and exits.

pub mod identity;
pub mod personality;
pub mod sys;
pub mod transfer;

use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use tracing::debug;

pub use identity::{Identity, probe_identity};
pub use personality::{Decision, PersonalityRequest, decide, ensure_identity};
pub use sys::Kernel;
#[cfg(unix)]
pub use sys::HostKernel;
pub use transfer::transfer;

/// Name the binary reports itself under.
pub const PROGRAM: &str = "mocklinux";

/// Consolidated error type for all mocklinux operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("usage: mocklinux <cmd> [args...]")]
    Usage,

    #[error("uname: error: {0}")]
    Query(#[source] std::io::Error),

    #[error("prctl: error: {0}")]
    Toggle(#[source] std::io::Error),

    #[error("exec: error: {0}")]
    Exec(#[source] std::io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;

/// The command to run and the arguments to hand it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new<C, I, A>(command: C, args: I) -> Self
    where
        C: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            command: command.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an invocation from a full command line, program name included.
    ///
    /// Fails with [`Error::Usage`] when no command follows the program name.
    pub fn from_args<I: IntoIterator<Item = OsString>>(args: I) -> Result<Self> {
        let mut args = args.into_iter().skip(1);
        let command = args.next().ok_or(Error::Usage)?;
        Ok(Self {
            command,
            args: args.collect(),
        })
    }

    pub fn command(&self) -> &OsStr {
        &self.command
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Argument vector of the target, with the command itself as `argv[0]`.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.command.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

pub struct ShimBuilder {
    request: PersonalityRequest,
}

impl Default for ShimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShimBuilder {
    pub fn new() -> Self {
        Self {
            request: PersonalityRequest::default(),
        }
    }

    /// Set the system name the target command must observe.
    pub fn target_label(mut self, label: impl Into<String>) -> Self {
        self.request.label = label.into();
        self
    }

    pub fn request(mut self, request: PersonalityRequest) -> Self {
        self.request = request;
        self
    }

    pub fn build(self) -> Shim {
        Shim {
            request: self.request,
        }
    }
}

/// Runs the probe, toggle and transfer sequence.
pub struct Shim {
    request: PersonalityRequest,
}

impl Shim {
    pub fn request(&self) -> &PersonalityRequest {
        &self.request
    }

    /// Run the sequence for a full command line, program name included.
    ///
    /// A missing command is rejected before the kernel is touched.
    pub fn run_args<K, I>(&self, kernel: &K, args: I) -> Result<Infallible>
    where
        K: Kernel + ?Sized,
        I: IntoIterator<Item = OsString>,
    {
        let invocation = Invocation::from_args(args)?;
        self.run(kernel, &invocation)
    }

    /// Settle the identity, then replace the process image.
    ///
    /// Only returns on failure. Nothing acquired before this call is released
    /// when the transfer succeeds.
    pub fn run<K: Kernel + ?Sized>(
        &self,
        kernel: &K,
        invocation: &Invocation,
    ) -> Result<Infallible> {
        let identity = probe_identity(kernel)?;
        let decision = ensure_identity(kernel, &identity, &self.request)?;
        debug!(?decision, label = %self.request.label, "identity settled");
        transfer(kernel, invocation)
    }
}

/// Run the sequence with the default Linux personality request.
pub fn run<K: Kernel + ?Sized>(kernel: &K, invocation: &Invocation) -> Result<Infallible> {
    ShimBuilder::new().build().run(kernel, invocation)
}
