fn main() {
    pubfund::app::cli::run();
}
