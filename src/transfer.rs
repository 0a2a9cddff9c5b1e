//! Process image replacement.

use crate::{Error, Invocation, Result, sys::Kernel};
use std::convert::Infallible;
use tracing::debug;

/// Replace the calling process image with the invocation's command.
///
/// The command receives the invocation's argument vector, its own name first,
/// and the inherited environment. On success this never returns and no
/// destructor of the caller runs; release anything that needs releasing
/// before calling it.
pub fn transfer<K: Kernel + ?Sized>(kernel: &K, invocation: &Invocation) -> Result<Infallible> {
    let argv = invocation.argv();
    debug!(?argv, "replacing process image");
    Err(Error::Exec(kernel.exec(&argv)))
}
