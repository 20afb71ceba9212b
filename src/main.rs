fn main() {
    pr_checks::app::cli::run();
}
