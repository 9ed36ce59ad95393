fn main() {
    if let Err(err) = driveframe::cli::main() {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
}
