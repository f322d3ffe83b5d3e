fn main() {
    if let Err(e) = cpscan_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
