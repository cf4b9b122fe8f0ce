//! qifxlat - Translate a QIF export to CSV, JSON or Ledger.

fn main() -> std::process::ExitCode {
    qifxlat::cmd::convert::main()
}
