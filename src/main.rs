//! stockpos main entrypoint.

use stockpos::run;

fn main() {
    println!();
    if let Err(e) = run() {
        eprintln!("Error [{}]: {}", e.kind(), e);
        std::process::exit(1);
    }
}
