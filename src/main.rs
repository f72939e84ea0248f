use std::io;
use std::process;

use keycheck_rs::cli;
use keycheck_rs::core::validate::Outcome;

const EXIT_ACCEPTED: i32 = 0;
const EXIT_REJECTED: i32 = 1;

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let code = match cli::run(&mut input, &mut output) {
        Ok(Outcome::Accepted) => EXIT_ACCEPTED,
        Ok(Outcome::Rejected(_)) => EXIT_REJECTED,
        Err(e) => {
            eprintln!("keycheck: {e}");
            EXIT_REJECTED
        }
    };
    process::exit(code);
}
