//! shotgun CLI: evolve noisy descendants of a sentence and sample reads
//!
//! Commands:
//!   shotgun evolve     one descendant of a seed sentence
//!   shotgun tree       a branching tree of descendants
//!   shotgun reads      shotgun reads sampled from tree leaves
//!   shotgun run        reads driven by a JSON config file
//!   shotgun neighbors  dictionary words within k edits of a word

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use shotgun_core::{
    DescendantTree, EvolutionConfig, Evolver, Neighborhood, ReadSampler, Result, ShotgunConfig,
    ShotgunError, Vocabulary,
};
use std::env;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

fn print_usage() {
    eprintln!(
        r#"
Usage: shotgun <command> [options]

Commands:
  evolve    <dictionary> <edits/word> <max-edits/letter> <words...>
  tree      <dictionary> <edits/word> <max-edits/letter> <depth> <words...>
  reads     <dictionary> <edits/word> <max-edits/letter> <coverage> <read-length> <words...>
  run       <config.json> <words...>
  neighbors <dictionary> <word> <max-edits>

Options:
  --seed <n>       fix the random seed
  --depth <n>      tree depth for reads (default 1)
  --branching <n>  children per tree node (default 2)
  --json           print JSON instead of text

Examples:
  shotgun evolve words.txt 1.0 0.34 the quick brown fox
  shotgun reads words.txt 0.5 0.34 10 3 the quick brown fox --seed 7
  shotgun neighbors words.txt cat 1
"#
    );
}

/// Flags accepted by every command
#[derive(Debug, Default)]
struct Options {
    rng_seed: Option<u64>,
    depth: Option<u32>,
    branching: Option<u32>,
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (positional, options) = match split_options(&args) {
        Ok(split) => split,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(1);
        }
    };
    let Some((command, rest)) = positional.split_first() else {
        print_usage();
        process::exit(1);
    };

    let outcome = match command.as_str() {
        "evolve" => cmd_evolve(rest, &options),
        "tree" => cmd_tree(rest, &options),
        "reads" => cmd_reads(rest, &options),
        "run" => cmd_run(rest, &options),
        "neighbors" => cmd_neighbors(rest, &options),
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    };

    match outcome {
        Ok(()) => {}
        Err(ShotgunError::Stuck { rendered, remaining, .. }) => {
            error!("Ran out of possibilities with {} edits left", remaining);
            println!("Ran out of possibilities -- string:\n{}", rendered);
            process::exit(1);
        }
        Err(e @ (ShotgunError::UnknownWord(_) | ShotgunError::InvalidConfig(_) | ShotgunError::EmptySeed)) => {
            eprintln!("{}", e);
            print_usage();
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Pull `--flag value` pairs out of the argument list
fn split_options(args: &[String]) -> std::result::Result<(Vec<String>, Options), String> {
    let mut positional = Vec::new();
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .ok_or_else(|| format!("{} needs a value", flag))
                .and_then(|v| v.parse::<u64>().map_err(|_| format!("{} expects a number, got {}", flag, v)))
        };
        match arg.as_str() {
            "--seed" => options.rng_seed = Some(value("--seed")?),
            "--depth" => options.depth = Some(value("--depth")? as u32),
            "--branching" => options.branching = Some(value("--branching")? as u32),
            "--json" => options.json = true,
            _ => positional.push(arg.clone()),
        }
    }
    Ok((positional, options))
}

fn parse_arg<T: FromStr>(what: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| ShotgunError::InvalidConfig(format!("{} must be a number, got '{}'", what, raw)))
}

fn require(args: &[String], min: usize, usage: &str) -> Result<()> {
    if args.len() < min {
        Err(ShotgunError::InvalidConfig(format!("usage: shotgun {}", usage)))
    } else {
        Ok(())
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(rand::random);
    info!("Random seed {} (replay with --seed {})", seed, seed);
    StdRng::seed_from_u64(seed)
}

fn evolution_config(edits_per_word: &str, max_edits_per_letter: &str) -> Result<EvolutionConfig> {
    let config = EvolutionConfig {
        edits_per_word: parse_arg("edits per word", edits_per_word)?,
        max_edits_per_letter: parse_arg("max edits per letter", max_edits_per_letter)?,
    };
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn log_cache(evolver: &Evolver<'_>) {
    let stats = evolver.neighborhood().cache_stats();
    info!(
        "Distance cache: {} pairs | {} hits | {} misses | {} refreshed bounds",
        evolver.neighborhood().cached_pairs(),
        stats.hits,
        stats.misses,
        stats.refreshed_bounds
    );
}

fn cmd_evolve(args: &[String], options: &Options) -> Result<()> {
    require(args, 4, "evolve <dictionary> <edits/word> <max-edits/letter> <words...>")?;
    let config = evolution_config(&args[1], &args[2])?;
    let vocab = Vocabulary::load(&args[0])?;
    let seed = vocab.sentence(&args[3..])?;
    let mut rng = make_rng(options.rng_seed);

    let mut evolver = Evolver::new(&vocab, config);
    info!(
        "Evolving '{}' with {} edits",
        seed.render(&vocab),
        evolver.global_budget(seed.len())
    );
    let descendant = evolver.evolve(&seed, &mut rng)?;
    log_cache(&evolver);

    if options.json {
        print_json(&descendant)
    } else {
        println!("{}", descendant.render(&vocab));
        Ok(())
    }
}

fn cmd_tree(args: &[String], options: &Options) -> Result<()> {
    require(args, 5, "tree <dictionary> <edits/word> <max-edits/letter> <depth> <words...>")?;
    let config = evolution_config(&args[1], &args[2])?;
    let depth: u32 = parse_arg("depth", &args[3])?;
    let branching = options.branching.unwrap_or(2);
    if branching == 0 {
        return Err(ShotgunError::InvalidConfig("branching must be positive".into()));
    }
    let vocab = Vocabulary::load(&args[0])?;
    let seed = vocab.sentence(&args[4..])?;
    let mut rng = make_rng(options.rng_seed);

    let mut evolver = Evolver::new(&vocab, config);
    let tree = DescendantTree::grow(&mut evolver, &seed, depth, branching, &mut rng)?;
    info!("Grew {} descendants over {} levels", tree.len() - 1, depth);
    log_cache(&evolver);

    if options.json {
        print_json(&tree)
    } else {
        println!("{}", tree.render(&vocab));
        Ok(())
    }
}

fn cmd_reads(args: &[String], options: &Options) -> Result<()> {
    require(
        args,
        6,
        "reads <dictionary> <edits/word> <max-edits/letter> <coverage> <read-length> <words...>",
    )?;
    let defaults = ShotgunConfig::default();
    let config = ShotgunConfig {
        dictionary: PathBuf::from(&args[0]),
        evolution: evolution_config(&args[1], &args[2])?,
        coverage: parse_arg("coverage", &args[3])?,
        read_length: parse_arg("read length", &args[4])?,
        depth: options.depth.unwrap_or(defaults.depth),
        branching: options.branching.unwrap_or(defaults.branching),
        rng_seed: options.rng_seed,
    };
    shotgun(&config, &args[5..], options.json)
}

fn cmd_run(args: &[String], options: &Options) -> Result<()> {
    require(args, 2, "run <config.json> <words...>")?;
    let mut config = ShotgunConfig::from_json(&std::fs::read_to_string(&args[0])?)?;
    if options.rng_seed.is_some() {
        config.rng_seed = options.rng_seed;
    }
    shotgun(&config, &args[1..], options.json)
}

/// Grow the descendant tree and cut reads from its leaves
fn shotgun(config: &ShotgunConfig, words: &[String], json: bool) -> Result<()> {
    config.validate()?;
    let vocab = Vocabulary::load(&config.dictionary)?;
    let seed = vocab.sentence(words)?;
    let mut rng = make_rng(config.rng_seed);

    let mut evolver = Evolver::new(&vocab, config.evolution.clone());
    let tree = DescendantTree::grow(&mut evolver, &seed, config.depth, config.branching, &mut rng)?;
    let sampler = ReadSampler::new(config.coverage, config.read_length);
    let reads = sampler.sample(&tree, &mut rng);
    info!(
        "Sampled {} reads of {} words from {} leaves",
        reads.len(),
        config.read_length,
        tree.leaves().len()
    );
    log_cache(&evolver);

    if json {
        return print_json(&reads);
    }
    for (i, read) in reads.iter().enumerate() {
        let source = if read.source.is_empty() { "seed" } else { read.source.as_str() };
        println!(">read{} leaf={} offset={}", i + 1, source, read.offset);
        println!("{}", read.render(&vocab));
    }
    Ok(())
}

fn cmd_neighbors(args: &[String], options: &Options) -> Result<()> {
    require(args, 3, "neighbors <dictionary> <word> <max-edits>")?;
    let vocab = Vocabulary::load(&args[0])?;
    let src = vocab
        .lookup(&args[1])
        .ok_or_else(|| ShotgunError::UnknownWord(args[1].to_uppercase()))?;
    let max_edits: u32 = parse_arg("max edits", &args[2])?;

    let mut hood = Neighborhood::new(&vocab);
    let nbrs = hood.neighbors(src, max_edits);
    info!(
        "{} neighbors of '{}' within {} edits",
        nbrs.len(),
        vocab.word(src),
        max_edits
    );

    if options.json {
        let listing: Vec<(&str, u32)> = nbrs.iter().map(|(id, d)| (vocab.word(id), d)).collect();
        return print_json(&listing);
    }
    for (id, d) in nbrs.iter() {
        println!("{}\t{}", vocab.word(id), d);
    }
    Ok(())
}
