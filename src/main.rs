use clap::Parser;

use mdbundle::cli::{run, Args};

fn main() {
    let args = Args::parse();
    std::process::exit(run(args));
}
