//! `zobject-form`: convert a ZObject (stdin) to another form (stdout).
//!
//! Usage:
//!   zobject-form [--to canonical|normal|hybrid]
//!
//! Input may be in any form; the default target is canonical.

use std::io::{self, Read};

use zobject::cli::{convert_form, init_tracing, Form};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let mut form = Form::default();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--to" {
            i += 1;
            match args.get(i).map(|s| s.parse::<Form>()) {
                Some(Ok(f)) => form = f,
                Some(Err(e)) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
                None => {
                    eprintln!("--to needs a form: canonical, normal or hybrid.");
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match convert_form(buf.trim(), form) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
