use mocklinux::{Error, HostKernel, PROGRAM, ShimBuilder};
use std::{env, process::exit};
use tracing_subscriber::EnvFilter;

fn main() {
    setup_logging();

    let shim = ShimBuilder::new().build();
    match shim.run_args(&HostKernel, env::args_os()) {
        Ok(never) => match never {},
        Err(err) => fail(&err),
    }
}

fn fail(err: &Error) -> ! {
    match err {
        Error::Usage => eprintln!("{err}"),
        _ => eprintln!("{PROGRAM}: {err}"),
    }
    exit(1);
}

fn setup_logging() {
    // stdout belongs to the target command
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
