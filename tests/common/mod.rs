//! Test double for the kernel capabilities.

#![allow(dead_code)]

use mocklinux::{Identity, Kernel, PersonalityRequest};
use std::cell::RefCell;
use std::ffi::OsString;
use std::io;

/// Kernel calls in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    QueryIdentity,
    RequestPersonality(PersonalityRequest),
    Exec(Vec<OsString>),
}

/// Scripted kernel that records every call.
///
/// `exec` never replaces anything: it records the argument vector and returns
/// the scripted error, or `Interrupted` standing in for a successful transfer.
pub struct FakeKernel {
    identity: Result<Identity, i32>,
    personality: Result<(), i32>,
    exec_errno: Option<i32>,
    calls: RefCell<Vec<Call>>,
}

impl FakeKernel {
    pub fn reporting(sysname: &str) -> Self {
        Self {
            identity: Ok(Identity::named(sysname)),
            personality: Ok(()),
            exec_errno: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_query(errno: i32) -> Self {
        Self {
            identity: Err(errno),
            ..Self::reporting("")
        }
    }

    pub fn rejecting_personality(mut self, errno: i32) -> Self {
        self.personality = Err(errno);
        self
    }

    pub fn failing_exec(mut self, errno: i32) -> Self {
        self.exec_errno = Some(errno);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|&c| pred(c)).count()
    }

    pub fn toggles(&self) -> usize {
        self.count(|c| matches!(c, Call::RequestPersonality(_)))
    }

    pub fn execs(&self) -> Vec<Vec<OsString>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Exec(argv) => Some(argv.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Kernel for FakeKernel {
    fn query_identity(&self) -> io::Result<Identity> {
        self.calls.borrow_mut().push(Call::QueryIdentity);
        self.identity
            .clone()
            .map_err(io::Error::from_raw_os_error)
    }

    fn request_personality(&self, request: &PersonalityRequest) -> io::Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::RequestPersonality(request.clone()));
        self.personality.map_err(io::Error::from_raw_os_error)
    }

    fn exec(&self, argv: &[OsString]) -> io::Error {
        self.calls.borrow_mut().push(Call::Exec(argv.to_vec()));
        match self.exec_errno {
            Some(errno) => io::Error::from_raw_os_error(errno),
            None => io::Error::new(io::ErrorKind::Interrupted, "transferred"),
        }
    }
}

pub fn os(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}
