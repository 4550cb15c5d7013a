use std::process;
use std::time::Instant;

use karger_mincut::{Graph, Result};

struct Options {
    weighted: bool,
    products: usize,
    trials: usize,
    file: String,
    verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            weighted: false,
            products: 5,
            trials: 10,
            file: "graph.txt".to_string(),
            verbose: false,
        }
    }
}

fn main() {
    env_logger::init();
    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(Some(opts)) => opts,
        Ok(None) => return,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            process::exit(2);
        }
    };
    if let Err(err) = run(&opts) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(opts: &Options) -> Result<()> {
    let mut rng = rand::thread_rng();

    println!(
        "Running {} trials in a {}-vertex 70% connected graph.",
        opts.trials, opts.products
    );
    let base = Graph::generate(opts.products, opts.weighted, &mut rng)?;
    base.save(&opts.file)?;
    if opts.verbose {
        print!("{}", base.dump_products());
        print!("{}", base.dump_adjacency());
    }

    let mut best = usize::MAX;
    for trial in 1..=opts.trials {
        let mut graph = Graph::load(&opts.file, &base)?;
        let start = Instant::now();
        let cut = graph.min_cut(&mut rng)?;
        let elapsed = start.elapsed();
        println!("{trial}: cut {cut} in {:.3}s", elapsed.as_secs_f64());
        if opts.verbose {
            print!("{}", graph.dump_graph());
        }
        best = best.min(cut);
    }
    if best == 0 {
        println!("minimum cut over {} trials: 0 (graph is disconnected)", opts.trials);
    } else {
        println!("minimum cut over {} trials: {best}", opts.trials);
    }
    Ok(())
}

/// Parses the flag list by hand. Returns `Ok(None)` when `-h` was given.
fn parse_args(mut args: impl Iterator<Item = String>) -> std::result::Result<Option<Options>, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-w" => opts.weighted = true,
            "-v" => opts.verbose = true,
            "-num" => {
                let value = args.next().ok_or("-num needs an integer argument")?;
                opts.products = value
                    .parse()
                    .map_err(|_| format!("-num: not an integer: {value:?}"))?;
            }
            "-tests" => {
                let value = args.next().ok_or("-tests needs an integer argument")?;
                opts.trials = value
                    .parse()
                    .map_err(|_| format!("-tests: not an integer: {value:?}"))?;
            }
            "-f" => {
                let value = args.next().ok_or("-f needs a file name argument")?;
                opts.file = format!("{value}.txt");
            }
            "-h" => {
                print_usage();
                return Ok(None);
            }
            other => return Err(format!("argument not supported: {other}")),
        }
    }
    Ok(Some(opts))
}

fn print_usage() {
    println!("mincut [-w] [-v] [-num <INTEGER>] [-tests <INTEGER>] [-f <STRING>] [-h]");
    println!("Available options:");
    println!("    -w: graph will be weighted");
    println!("    -v: print the product list, adjacency matrix and per-trial graph state");
    println!("    -num <INTEGER>: number of vertices for the graph (default 5)");
    println!("    -tests <INTEGER>: number of trials (default 10)");
    println!("    -f <STRING>: file name to save the graph (default graph)");
    println!("    -h: this helpful message");
}
