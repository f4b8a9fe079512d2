use xpdo_openapi::cli::run_cli;

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
