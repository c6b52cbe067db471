use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use env_logger::Env;
use itertools::Itertools;
use log::{debug, error};
use structopt::StructOpt;

mod instruction;
mod walker;

use walker::{GridWalker, WalkResult};

#[derive(Debug)]
struct Error(String);

impl<T: ToString> From<T> for Error {
    fn from(error: T) -> Self {
        Error(error.to_string())
    }
}

#[derive(Debug, StructOpt)]
struct Opts {
    /// Log each walk and the first revisit as they are found
    #[structopt(short, long)]
    debug: bool,

    /// File with one walk per line, read from stdin if not given
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,
}

fn report(result: &WalkResult, mut output: impl Write) -> Result<(), Error> {
    match result.first_revisit {
        Some(position) => writeln!(
            output,
            "First revisit {}, distance {}",
            position,
            position.distance()
        )?,
        None => writeln!(output, "No position visited twice")?,
    }

    writeln!(
        output,
        "Final position {}, distance {}",
        result.final_position,
        result.final_position.distance()
    )?;

    Ok(())
}

/// Walks every non-blank line independently. Returns the number of lines that
/// could not be walked.
fn walk_all(input: impl BufRead, mut output: impl Write) -> Result<usize, Error> {
    let mut failed = 0;

    // Split on raw bytes so a line that isn't UTF-8 fails on its own.
    for (index, line) in input.split(b'\n').enumerate() {
        let number = index + 1;
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(err) => {
                error!("Line {}: {}", number, err);
                failed += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let instructions = match instruction::parse_line(&line) {
            Ok(instructions) => instructions,
            Err(err) => {
                error!("Line {}: {}", number, err);
                failed += 1;
                continue;
            }
        };

        debug!("Line {}: walking {}", number, instructions.iter().join(", "));
        let result = GridWalker::run(instructions);
        debug!("Line {}: {} steps taken", number, result.steps);

        report(&result, &mut output)?;
    }

    Ok(failed)
}

fn walk_file(path: &Path, output: impl Write) -> Result<usize, Error> {
    walk_all(BufReader::new(File::open(path)?), output)
}

fn main() -> Result<(), Error> {
    let opts = Opts::from_args();

    let level = if opts.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let failed = match &opts.input {
        Some(path) => walk_file(path, stdout().lock())?,
        None => walk_all(stdin().lock(), stdout().lock())?,
    };

    if failed > 0 {
        return Err(Error(format!("{} walk(s) had invalid instructions", failed)));
    }

    Ok(())
}

#[cfg(test)]
fn run_on(input: &str) -> (String, usize) {
    let mut output = vec![];
    let failed = walk_all(input.as_bytes(), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), failed)
}

#[test]
fn reports_revisit_and_final_position() {
    let (output, failed) = run_on("R8, R4, R4, R8\n");
    assert_eq!(failed, 0);
    assert_eq!(
        output,
        "First revisit (4,0), distance 4\nFinal position (4,4), distance 8\n"
    );
}

#[test]
fn reports_missing_revisit() {
    let (output, _) = run_on("R2, L1");
    assert_eq!(
        output,
        "No position visited twice\nFinal position (2,1), distance 3\n"
    );
}

#[test]
fn lines_are_independent_walks() {
    let (output, failed) = run_on("R1, R1, R1, R1\n\nR5, L5, R5, R3\n");
    assert_eq!(failed, 0);
    assert_eq!(
        output,
        "First revisit (0,0), distance 0\n\
         Final position (0,0), distance 0\n\
         No position visited twice\n\
         Final position (10,2), distance 12\n"
    );
}

#[test]
fn invalid_line_is_skipped_without_output() {
    let (output, failed) = run_on("R2, X3\nL3\nR-2\n");
    assert_eq!(failed, 2);
    assert_eq!(
        output,
        "No position visited twice\nFinal position (-3,0), distance 3\n"
    );
}

#[test]
fn line_that_is_not_utf8_fails_alone() {
    let mut output = vec![];
    let failed = walk_all(&b"R2, \xffL1\nR2, L1\n"[..], &mut output).unwrap();
    assert_eq!(failed, 1);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "No position visited twice\nFinal position (2,1), distance 3\n"
    );
}

#[test]
fn windows_line_endings() {
    let (output, failed) = run_on("R2, L1\r\nR8, R4, R4, R8\r\n");
    assert_eq!(failed, 0);
    assert_eq!(
        output,
        "No position visited twice\n\
         Final position (2,1), distance 3\n\
         First revisit (4,0), distance 4\n\
         Final position (4,4), distance 8\n"
    );
}

#[test]
fn walks_read_from_file() {
    let path = std::env::temp_dir().join(format!("advent_1_walks_{}.txt", std::process::id()));
    std::fs::write(&path, "R8, R4, R4, R8\nL5, Z1\n").unwrap();

    let mut output = vec![];
    let failed = walk_file(&path, &mut output).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(failed, 1);
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "First revisit (4,0), distance 4\nFinal position (4,4), distance 8\n"
    );
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join(format!("advent_1_missing_{}.txt", std::process::id()));
    assert!(walk_file(&path, vec![]).is_err());
}

#[test]
fn command_line_options() {
    let opts = Opts::from_iter(&["advent_1", "--debug", "walks.txt"]);
    assert!(opts.debug);
    assert_eq!(opts.input, Some(PathBuf::from("walks.txt")));

    let opts = Opts::from_iter(&["advent_1"]);
    assert!(!opts.debug);
    assert_eq!(opts.input, None);
}

#[test]
fn walk_errors_convert_into_driver_errors() {
    let err: Error = instruction::InvalidInstruction::Turn('X').into();
    assert_eq!(err.0, "Invalid turn 'X'");
}
