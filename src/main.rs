use mica::report::{describe_chunk, describe_table};
use mica::settings::{settings_path, Settings};
use mica::World;
use std::env::args;
use std::fs::read;
use std::path::PathBuf;
use std::process::ExitCode;

/*
usage:
    mica-inspect <payload> <chunk_x> <chunk_z> [mappings.json] [-json] [-blocks]

    -json:   also print the decoded chunk as JSON
    -blocks: list every stored block in the report
*/
struct Args {
    payload: PathBuf,
    chunk_x: i32,
    chunk_z: i32,
    mappings: Option<PathBuf>,
    json: bool,
    blocks: bool,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut json = false;
    let mut blocks = false;

    for arg in args().skip(1) {
        match arg.as_str() {
            "-json" => json = true,
            "-blocks" => blocks = true,
            _ => positional.push(arg),
        }
    }

    if !(3..=4).contains(&positional.len()) {
        return None;
    }

    Some(Args {
        payload: PathBuf::from(&positional[0]),
        chunk_x: positional[1].parse().ok()?,
        chunk_z: positional[2].parse().ok()?,
        mappings: positional.get(3).map(PathBuf::from),
        json,
        blocks,
    })
}

fn run(args: Args) -> mica::Result<()> {
    let settings = match settings_path() {
        Some(path) => Settings::load_or_default(&path),
        None => {
            log::warn!("No settings directory found. Set MICA_ROOT to override.");
            Settings::default()
        }
    };

    let world = World::with_settings(&settings);

    if let Some(path) = &args.mappings {
        log::info!("Loading block mappings from: {path:?}");
        let json = std::fs::read_to_string(path)?;
        world.load_block_mappings_json(&json)?;
        print!("{}", describe_table(&world.block_table()?)?);
    }

    let payload = read(&args.payload)?;
    let chunk = world.decode_chunk(&payload, args.chunk_x, args.chunk_z)?;

    print!(
        "{}",
        describe_chunk(&chunk, args.blocks || settings.report.list_blocks)?
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*chunk)?);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args() else {
        eprintln!("usage: mica-inspect <payload> <chunk_x> <chunk_z> [mappings.json] [-json] [-blocks]");
        return ExitCode::FAILURE;
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
