use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use commitbrute::io_utils::{brute_cli_error, io_cli_error, simple_cli_error};
use commitbrute::{find_date, has_prefix, object_id, DateField};

/// Print the git object id and dates of a raw commit object
/// (as produced by `git cat-file -p <commit>`).
#[derive(Parser)]
struct Args {
    /// Commit object file, or `-` for stdin
    input: PathBuf,

    /// Exit with failure unless the object id starts with this prefix
    #[arg(long)]
    prefix: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let body = if args.input.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(&args.input).map_err(|e| io_cli_error("reading commit object", &args.input, e))?
    };

    let id = object_id(&body);
    let (author, _) =
        find_date(&body, DateField::Author).map_err(|e| brute_cli_error("parsing", e))?;
    let (committer, _) =
        find_date(&body, DateField::Committer).map_err(|e| brute_cli_error("parsing", e))?;

    println!("{id}");
    println!("author    {author}");
    println!("committer {committer}");

    if let Some(prefix) = args.prefix {
        if !has_prefix(&id, &prefix) {
            return Err(simple_cli_error(&format!("{id} does not start with {prefix}")).into());
        }
    }
    Ok(())
}
