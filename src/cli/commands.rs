use crate::{
    hot_reload::watch_route_table,
    router::{RouteMatcher, Router},
    routes::{load_route_table, parse_method},
};
use clap::{Parser, Subcommand};
use http::Method;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line interface for routedfa
#[derive(Parser)]
#[command(name = "routedfa")]
#[command(about = "Compile route tables into a DFA and match request paths", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Match request paths against a route table
    Match {
        /// Path to the route table (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method used to select among candidates
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Print the states visited by each walk
        #[arg(long, default_value_t = false)]
        trace: bool,

        /// Request paths to match
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the compiled automaton
    Inspect {
        /// Path to the route table (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Hot-reload a route table and match paths read from stdin
    Watch {
        /// Path to the route table (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// HTTP method used to select among candidates
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
}

/// Print the candidates and selection for `path`, all taken from one match against
/// `matcher` so a concurrent reload cannot split them across two automata.
pub(super) fn print_match<W: Write>(
    out: &mut W,
    matcher: &RouteMatcher,
    method: &Method,
    path: &str,
    trace: bool,
) -> io::Result<()> {
    writeln!(out, "{method} {path}")?;
    if trace {
        let states: Vec<String> = matcher.trace(path).iter().map(usize::to_string).collect();
        writeln!(out, "  trace: {}", states.join(" -> "))?;
    }

    let set = matcher.match_path(path);
    if set.is_empty() {
        return writeln!(out, "  no match");
    }
    writeln!(out, "  candidates:")?;
    for (i, candidate) in set.iter().enumerate() {
        writeln!(out, "    [{i}] {}", candidate.endpoint)?;
    }

    match set.iter().find(|c| c.endpoint.accepts(method)) {
        Some(candidate) => {
            write!(out, "  selected: {}", candidate.endpoint.handler_name)?;
            for (name, value) in &set.values(candidate) {
                write!(out, " {name}={value}")?;
            }
            writeln!(out)
        }
        None => writeln!(out, "  selected: none (method not allowed)"),
    }
}

/// Run `cli`, writing results to `out`; `watch` reads paths from `input`.
pub fn execute<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Match {
            routes,
            method,
            trace,
            paths,
        } => {
            let method = parse_method(method)?;
            let table = load_route_table(routes)?;
            let matcher = table.build_matcher()?;
            for path in paths {
                print_match(out, &matcher, &method, path, *trace)?;
            }
            Ok(())
        }
        Commands::Inspect { routes } => {
            let table = load_route_table(routes)?;
            let matcher = table.build_matcher()?;
            writeln!(
                out,
                "routes={} options: linear_search_max={} trie_threshold={} vectorize={}",
                table.len(),
                table.options.linear_search_max,
                table
                    .options
                    .trie_threshold
                    .map_or_else(|| "off".to_string(), |t| t.to_string()),
                table.options.vectorize
            )?;
            for (kind, count) in matcher.table_histogram() {
                writeln!(out, "  {kind}: {count}")?;
            }
            write!(out, "{matcher}")?;
            Ok(())
        }
        Commands::Watch { routes, method } => {
            let method = parse_method(method)?;
            let table = load_route_table(routes)?;
            let router = Arc::new(Router::new(&table)?);
            let _watcher = watch_route_table(routes, Arc::clone(&router), |table| {
                tracing::info!(routes_count = table.len(), "watch: route table reloaded");
            })?;
            for line in input.lines() {
                let line = line?;
                let path = line.trim();
                if path.is_empty() {
                    continue;
                }
                print_match(out, &router.snapshot(), &method, path, false)?;
                out.flush()?;
            }
            Ok(())
        }
    }
}

/// Parse the process arguments and run the selected command against stdin/stdout.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    execute(&cli, stdin.lock(), &mut stdout)
}
