//! Simple command that prints one or '-n count' identifiers, or inspects one given by '-d text'

use std::{env, io, io::Write, process::ExitCode};

enum Command {
    Generate(usize),
    Inspect(String),
}

fn main() -> io::Result<ExitCode> {
    let command = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count | -d text]",
                    program.as_deref().unwrap_or("ulid")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    match command {
        Command::Generate(count) => {
            let mut rng = ulid64::GlobalRng::new();
            for _ in 0..count {
                match ulid64::Ulid::generate_with(&mut rng) {
                    Ok(id) => writeln!(buf, "{}", id)?,
                    Err(err) => {
                        buf.flush()?;
                        eprintln!("Error: {}", err);
                        return Ok(ExitCode::FAILURE);
                    }
                }
            }
        }
        Command::Inspect(text) => match text.parse::<ulid64::Ulid>() {
            Ok(id) => {
                writeln!(buf, "timestamp_ms: {}", id.timestamp_ms())?;
                writeln!(buf, "random:       {:020x}", id.random_part())?;
                writeln!(buf, "bytes:        {:02x?}", id.to_bytes())?;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut command = None;
    while let Some(arg) = args.next() {
        if command.is_some() {
            return Err("options given more than once".to_owned());
        }
        match arg.as_str() {
            "-n" => {
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                command.replace(Command::Generate(c));
            }
            "-d" => {
                let Some(text) = args.next() else {
                    return Err("argument to option 'd' missing".to_owned());
                };
                command.replace(Command::Inspect(text));
            }
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        }
    }
    Ok(command.unwrap_or(Command::Generate(1)))
}
