// vim: set ai et ts=4 sts=4 sw=4:
mod util;
mod grid;
mod line;
mod puzzle;

use std::io;
use std::fs;
use std::process::exit;
use clap::{App, Arg};
use log::debug;
use yaml_rust::YamlLoader;

use self::puzzle::{Puzzle, DEFAULT_FILL_PROBABILITY};
use self::util::is_a_tty;

pub struct Args {
    pub width:       usize,
    pub height:      usize,
    pub density:     f64,
    pub puzzle_file: Option<String>,
    pub max_ticks:   usize,
    pub no_color:    bool,
    pub verbose:     bool,
}

fn parse_args() -> Args {
    let matches = App::new("picross")
        .about("Generates a picross (nonogram) puzzle and propagates its line constraints")
        .arg(Arg::with_name("width")
                 .short("W").long("width")
                 .takes_value(true)
                 .help("board width in squares (default 10)"))
        .arg(Arg::with_name("height")
                 .short("H").long("height")
                 .takes_value(true)
                 .help("board height in squares (default 10)"))
        .arg(Arg::with_name("density")
                 .short("d").long("density")
                 .takes_value(true)
                 .help("probability that a generated square is filled (default 0.4)"))
        .arg(Arg::with_name("puzzle")
                 .short("p").long("puzzle")
                 .takes_value(true)
                 .help("YAML file with rows:/cols: hint lists instead of a generated puzzle"))
        .arg(Arg::with_name("max-ticks")
                 .long("max-ticks")
                 .takes_value(true)
                 .help("tick budget for the auto-solver (default 100000)"))
        .arg(Arg::with_name("no-color")
                 .long("no-color")
                 .help("never emit ANSI colors"))
        .arg(Arg::with_name("verbose")
                 .short("v").long("verbose")
                 .help("log every solver deduction"))
        .get_matches();

    let usize_arg = |name: &str, default: usize| -> usize {
        match matches.value_of(name) {
            None    => default,
            Some(s) => s.parse().unwrap_or_else(|_| {
                eprintln!("invalid value for --{}: {}", name, s);
                exit(2);
            }),
        }
    };
    let density = match matches.value_of("density") {
        None    => DEFAULT_FILL_PROBABILITY,
        Some(s) => s.parse().unwrap_or_else(|_| {
            eprintln!("invalid value for --density: {}", s);
            exit(2);
        }),
    };
    if !(0.0..=1.0).contains(&density) {
        eprintln!("--density must lie in [0, 1]");
        exit(2);
    }

    Args {
        width:       usize_arg("width", 10),
        height:      usize_arg("height", 10),
        density,
        puzzle_file: matches.value_of("puzzle").map(String::from),
        max_ticks:   usize_arg("max-ticks", 100_000),
        no_color:    matches.is_present("no-color"),
        verbose:     matches.is_present("verbose"),
    }
}

fn setup_logger(verbose: bool) -> Result<(), fern::InitError> {
    let level = match verbose {
        true  => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:-5}] {}: {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()?;
    Ok(())
}

fn load_puzzle(args: &Args) -> Puzzle {
    match &args.puzzle_file {
        Some(path) => {
            let contents = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("could not read {}: {}", path, e);
                exit(1);
            });
            let docs = YamlLoader::load_from_str(&contents).unwrap_or_else(|e| {
                eprintln!("could not parse {}: {}", path, e);
                exit(1);
            });
            if docs.is_empty() {
                eprintln!("{} contains no YAML documents", path);
                exit(1);
            }
            // note: column numbers are listed top to bottom
            Puzzle::from_yaml(&docs[0])
        }
        None => {
            if args.width == 0 || args.height == 0 {
                eprintln!("board dimensions must be at least 1x1");
                exit(2);
            }
            let mut rng = rand::thread_rng();
            Puzzle::generate(args.width, args.height, args.density, &mut rng)
        }
    }
}

fn main() {
    let args = parse_args();
    if let Err(e) = setup_logger(args.verbose) {
        eprintln!("could not initialize logging: {}", e);
        exit(1);
    }

    let mut puzzle = load_puzzle(&args);
    let emit_color = !args.no_color && is_a_tty(io::stdout());

    println!("{}", puzzle.fmt_board(emit_color));

    puzzle.start_auto_solve();
    let mut ticks: usize = 0;
    while puzzle.is_auto_solving() && ticks < args.max_ticks {
        puzzle.tick();
        ticks += 1;
    }
    debug!("auto-solver stopped after {} ticks", ticks);

    println!("{}", puzzle.fmt_board(emit_color));
    if puzzle.is_solved() {
        println!("Solved after {} ticks.", ticks);
    } else if puzzle.is_auto_solving() {
        println!("Tick budget exhausted before the solver settled.");
    } else {
        println!("No further automatic progress; the remaining squares need cross-line reasoning.");
    }
}
