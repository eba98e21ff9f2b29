//! Entry point for the `agrilogix` command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn main() {
    if let Err(err) = agrilogix_cli::run() {
        eprintln!("agrilogix: {err}");
        std::process::exit(1);
    }
}
