fn main() {
    if let Err(e) = annuity::cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
