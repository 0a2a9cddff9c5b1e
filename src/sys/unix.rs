//! Host kernel access over `libc`.

use super::Kernel;
use crate::{Identity, PersonalityRequest, identity::field_bytes};
use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::process::Command;
use tracing::trace;

/// The kernel the process is running on.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostKernel;

impl Kernel for HostKernel {
    fn query_identity(&self) -> io::Result<Identity> {
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        let ret = unsafe { libc::uname(&mut uts) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Identity {
            sysname: field_bytes(&uts.sysname),
            release: field_bytes(&uts.release),
            machine: field_bytes(&uts.machine),
        })
    }

    fn request_personality(&self, request: &PersonalityRequest) -> io::Result<()> {
        prctl(request.channel, request.subcommand, request.activation)
    }

    fn exec(&self, argv: &[OsString]) -> io::Error {
        let Some((program, args)) = argv.split_first() else {
            return io::Error::new(io::ErrorKind::InvalidInput, "empty argument vector");
        };
        trace!(?program, "exec");
        // Searches PATH like execvp(3); environment and file descriptors are
        // inherited as they are.
        Command::new(program).args(args).exec()
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn prctl(option: libc::c_int, arg2: libc::c_ulong, arg3: libc::c_ulong) -> io::Result<()> {
    let ret = unsafe { libc::prctl(option, arg2, arg3, 0 as libc::c_ulong, 0 as libc::c_ulong) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn prctl(_option: libc::c_int, _arg2: libc::c_ulong, _arg3: libc::c_ulong) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_host_identity() {
        let identity = HostKernel.query_identity().unwrap();
        assert!(!identity.sysname.is_empty());
        assert!(!identity.sysname.contains(&0));
        #[cfg(target_os = "linux")]
        assert!(identity.sysname_matches("Linux"));
    }

    #[test]
    fn exec_rejects_empty_argv() {
        let err = HostKernel.exec(&[]);
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
