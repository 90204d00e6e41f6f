#[cfg(feature = "cairo-backend")]
use qi_profile::api::{ScoreProfileRequest, render_png};
#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    request_path: PathBuf,
    output_dir: PathBuf,
    print_table: bool,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = qi_profile::telemetry::init_default_tracing();
    match run() {
        Ok(()) => {}
        Err(RunError::Validation(message)) => {
            eprintln!("validation error: {message}");
            std::process::exit(2);
        }
        Err(RunError::Other(message)) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("render_score_profile requires the `cairo-backend` feature");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
enum RunError {
    Validation(String),
    Other(String),
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), RunError> {
    let args = parse_args(std::env::args().skip(1)).map_err(RunError::Other)?;

    let input = fs::read_to_string(&args.request_path).map_err(|err| {
        RunError::Other(format!(
            "failed to read {}: {err}",
            args.request_path.display()
        ))
    })?;
    let request = ScoreProfileRequest::from_json_compat_str(&input)
        .map_err(|err| RunError::Other(err.to_string()))?;

    let table = request
        .build_table()
        .map_err(|err| RunError::Validation(err.to_string()))?;
    if args.print_table {
        let json = table
            .to_json_contract_v1_pretty()
            .map_err(|err| RunError::Other(err.to_string()))?;
        println!("{json}");
    }

    let chart =
        render_png(&table, &request.chart).map_err(|err| RunError::Other(err.to_string()))?;
    fs::create_dir_all(&args.output_dir).map_err(|err| {
        RunError::Other(format!(
            "failed to create {}: {err}",
            args.output_dir.display()
        ))
    })?;
    let path = chart
        .write_to_dir(&args.output_dir)
        .map_err(|err| RunError::Other(err.to_string()))?;
    println!("wrote {}", path.display());
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut request_path = None;
    let mut output_dir = PathBuf::from(".");
    let mut print_table = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                let value = args.next().ok_or("missing value for --out")?;
                output_dir = PathBuf::from(value);
            }
            "--print-table" => print_table = true,
            "-h" | "--help" => {
                return Err(
                    "usage: render_score_profile <request.json> [--out <dir>] [--print-table]"
                        .to_owned(),
                );
            }
            other if request_path.is_none() => request_path = Some(PathBuf::from(other)),
            other => return Err(format!("unexpected argument `{other}`")),
        }
    }

    Ok(CliArgs {
        request_path: request_path.ok_or("missing request json path")?,
        output_dir,
        print_table,
    })
}
