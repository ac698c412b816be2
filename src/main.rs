fn main() {
    rcookie::cli::run();
}
