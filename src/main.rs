fn main() {
    #[cfg(feature = "cli")]
    shrinker::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("shrinker: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
