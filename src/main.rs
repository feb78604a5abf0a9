fn main() {
    env_logger::init();
    spec_reporter::cli::run();
}
