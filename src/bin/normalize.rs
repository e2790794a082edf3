#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fd_normalize::*;
use serde_json::{json, Value};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

#[derive(Debug, Parser)]
struct Args {
    /// Relation attributes, e.g. `ABCD` or `city,name,zip`
    #[clap(short, long, value_parser)]
    attributes: String,

    /// Functional dependency, e.g. `BC->D` (repeatable)
    #[clap(short, long = "fd", value_parser)]
    fds: Vec<String>,

    /// Operation
    #[clap(short = 'p', long, value_enum, default_value = "bcnf")]
    op: Op,

    /// Attribute set to close or project onto
    #[clap(short = 'x', long, value_parser)]
    target: Option<String>,

    /// Maximum number of splits during BCNF decomposition
    #[clap(long, default_value_t = DecomposeConfig::default().max_splits)]
    max_splits: usize,

    /// Print the BCNF decomposition tree to stderr
    #[clap(long)]
    tree: bool,

    /// Number of threads
    #[clap(short = 't', long)]
    num_threads: Option<usize>,

    /// Output file (stdout if omitted)
    #[clap(short, long, value_parser)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Op {
    /// Closure of the target attributes
    Closure,
    /// One minimal key
    Key,
    /// All candidate keys
    Keys,
    /// Projection of the dependencies onto the target attributes
    #[clap(alias("proj"))]
    Project,
    /// Minimal basis of the dependencies
    #[clap(alias("cover"))]
    Basis,
    /// BCNF decomposition
    Bcnf,
}

/// Parse `s` as a set of `relation`'s attributes. Once the schema has a
/// multi-character name, everything is read as separated names.
fn parse_attributes(s: &str, relation: &AttributeSet) -> Result<AttributeSet> {
    let ans = match Notation::of(relation) {
        Notation::Compact => s.parse()?,
        Notation::Separated => AttributeSet::parse_with(s, Notation::Separated)?,
    };
    Ok(ans)
}

fn parse_fd(s: &str, relation: &AttributeSet) -> Result<Fd> {
    let ans = match Notation::of(relation) {
        Notation::Compact => s.parse()?,
        Notation::Separated => Fd::parse_with(s, Notation::Separated)?,
    };
    Ok(ans)
}

fn parse_relation(args: &Args) -> Result<Relation> {
    let attributes: AttributeSet = args
        .attributes
        .parse()
        .with_context(|| format!("invalid attributes {:?}", args.attributes))?;
    let fds = args
        .fds
        .iter()
        .map(|s| parse_fd(s, &attributes).with_context(|| format!("invalid dependency {s:?}")))
        .collect::<Result<FdSet>>()?;
    Ok(Relation::new(attributes, fds)?)
}

fn parse_target(args: &Args, relation: &Relation) -> Result<AttributeSet> {
    let target = args
        .target
        .as_deref()
        .context("--target is required for this operation")?;
    parse_attributes(target, &relation.attributes)
        .with_context(|| format!("invalid target {target:?}"))
}

fn run(args: &Args, relation: &Relation) -> Result<Value> {
    let ans = match args.op {
        Op::Closure => {
            serde_json::to_value(closure(&parse_target(args, relation)?, &relation.fds))?
        }
        Op::Key => serde_json::to_value(find_minimal_key(relation))?,
        Op::Keys => serde_json::to_value(candidate_keys(relation))?,
        Op::Project => {
            serde_json::to_value(project(&parse_target(args, relation)?, &relation.fds))?
        }
        Op::Basis => serde_json::to_value(minimal_basis(&relation.fds))?,
        Op::Bcnf => {
            let config = DecomposeConfig {
                max_splits: args.max_splits,
            };
            let parts = if args.tree {
                let tree = bcnf_decompose_tree(relation, &config)?;
                eprint!("{}", tree.render()?);
                tree.into_relations()
            } else {
                bcnf_decompose_with(relation, &config)?
            };
            serde_json::to_value(parts)?
        }
    };
    Ok(ans)
}

fn main() -> Result<()> {
    utils::init_tracing_subscriber("info")?;
    let args = Args::parse();
    info!("args: {:#?}", args);
    utils::setup_rayon(args.num_threads)?;

    let begin = Instant::now();
    let relation = parse_relation(&args)?;
    info!("relation: {}", relation);

    let result = run(&args, &relation)?;
    let elapsed = Instant::now() - begin;
    info!("done in {:?}", elapsed);

    let output = json!({
        "op": format!("{:?}", args.op).to_lowercase(),
        "relation": relation,
        "target": args.target,
        "result": result,
        "time": elapsed.as_secs_f64(),
    });

    match &args.output {
        Some(path) => {
            let out = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(out, &output)?;
        }
        None => {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, &output)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
