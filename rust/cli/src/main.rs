use pokeher_cli::{logging, run};
use std::io;

fn main() {
    logging::init_logging();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let code = run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
