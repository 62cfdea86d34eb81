mod debug_report;

use actionset::{ActionType, Options, OverflowPolicy};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

actionset::actions! {
    enum FileAction {
        Read => "read",
        Write => "write",
        Execute => "execute",
        Delete => "delete",
        ReadLink => "readlink",
    }
}

actionset::actions! {
    enum SocketAction {
        Connect => "connect",
        Listen => "listen",
        Accept => "accept",
        Resolve => "resolve",
    }
}

actionset::actions! {
    enum PropertyAction {
        Read => "read",
        Write => "write",
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct FileFlags: u32 {
        const READ = 1 << 0;
        const WRITE = 1 << 1;
        const EXECUTE = 1 << 2;
        const DELETE = 1 << 3;
        const READLINK = 1 << 4;
    }
}

const LOG_ENV: &str = "ACTIONSET_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    File,
    Socket,
    Property,
}

impl Kind {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "file" => Ok(Kind::File),
            "socket" => Ok(Kind::Socket),
            "property" => Ok(Kind::Property),
            _ => Err(format!("error: unknown action type '{value}' (expected file, socket or property)")),
        }
    }

    fn names(self) -> Vec<&'static str> {
        match self {
            Kind::File => FileAction::ALL.iter().map(|a| a.name()).collect(),
            Kind::Socket => SocketAction::ALL.iter().map(|a| a.name()).collect(),
            Kind::Property => PropertyAction::ALL.iter().map(|a| a.name()).collect(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ok = match config.kind {
        Kind::File => {
            let ok = debug_report::print_run::<FileAction>(&config.input, &config.options, config.color);
            if ok {
                debug_report::print_flags::<FileAction, FileFlags>(&config.input, config.color);
            }
            ok
        }
        Kind::Socket => debug_report::print_run::<SocketAction>(&config.input, &config.options, config.color),
        Kind::Property => debug_report::print_run::<PropertyAction>(&config.input, &config.options, config.color),
    };

    if !ok {
        std::process::exit(1);
    }
}

struct CliConfig {
    input: String,
    kind: Kind,
    options: Options,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut kind = Kind::File;
    let mut options = Options::default();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("actionset {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--wrap" => options.overflow = OverflowPolicy::Wrap,
            "--type" | "-t" => {
                let value = args.next().ok_or_else(|| "error: --type expects a value".to_string())?;
                kind = Kind::parse(&value)?;
            }
            "--list" => {
                println!("{}", kind.names().join("\n"));
                std::process::exit(0);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
            _ if arg.starts_with("--type=") => {
                kind = Kind::parse(arg.trim_start_matches("--type="))?;
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    Ok(CliConfig { input: input.trim_end_matches(['\n', '\r']).to_string(), kind, options, color })
}

fn read_stdin_input() -> Result<String, String> {
    if io::stdin().is_terminal() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "actionset {version}

Parse a permission action string and show its encodings.

Usage:
  actionset [OPTIONS] [--] <actions...>
  echo 'read, write' | actionset [OPTIONS]

Options:
  -t, --type <type>   Action type: file, socket or property. Default: file
  --list              Print the actions of the selected type in ordinal order.
  --wrap              Encode masks even when the type has more actions than
                      the mask has bits.
  --color             Force ANSI color output.
  --no-color          Disable ANSI color output.
  -h, --help          Show this help message.
  -V, --version       Print version information.

Environment:
  {log_env}       Log filter (e.g. debug, trace). Logs go to stderr.

Exit codes:
  0  The action string is valid.
  1  The action string was rejected.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_flag_accepts_the_builtin_kinds() {
        assert_eq!(Kind::parse("file"), Ok(Kind::File));
        assert_eq!(Kind::parse("socket"), Ok(Kind::Socket));
        assert_eq!(Kind::parse("property"), Ok(Kind::Property));
        assert!(Kind::parse("wide").is_err());
    }

    #[test]
    fn list_follows_ordinal_order() {
        assert_eq!(Kind::File.names(), vec!["read", "write", "execute", "delete", "readlink"]);
        assert_eq!(Kind::Property.names(), vec!["read", "write"]);
    }
}
