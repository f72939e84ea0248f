//! Prints a key the checker accepts.

use keycheck_rs::core::validate::{SECRET, encode_key};

fn main() {
    println!("{}", encode_key(SECRET));
}
