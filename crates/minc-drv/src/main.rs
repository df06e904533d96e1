use std::process::exit;

use minc_drv::{parse_args, run, Action, USAGE, VERSION};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let action = match parse_args(&args) {
        Ok(action) => action,
        Err(e) => {
            eprintln!("mincc: {}", e);
            eprint!("{}", USAGE);
            exit(2);
        }
    };

    match action {
        Action::Help => print!("{}", USAGE),
        Action::Version => println!("mincc {}", VERSION),
        Action::Compile(config) => {
            if let Err(e) = run(&config) {
                eprintln!("{:#}", e);
                exit(1);
            }
        }
    }
}
