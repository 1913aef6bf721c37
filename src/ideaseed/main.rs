mod cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::print::print_error(&e);
        std::process::exit(if e.is_usage() { 2 } else { 1 });
    }
}
