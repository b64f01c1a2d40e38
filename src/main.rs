use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use netviz::config::Config;
use netviz::export::LayoutSnapshot;
use netviz::io::FormatRegistry;
use netviz::model::GraphModel;
use netviz::partition::Hierarchy;
use netviz::session::Session;

mod cli;

use cli::Args;

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(steps) = args.steps_per_frame {
        config.steps_per_frame = steps;
    }
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    let registry = FormatRegistry::with_defaults();
    let graph = match args.format {
        Some(format) => registry.read_graph_as(&args.edges, format.format_id()),
        None => registry.read_graph(&args.edges),
    }
    .with_context(|| format!("loading graph {}", args.edges.display()))?;

    let hierarchy = Hierarchy::load(&args.partition)
        .with_context(|| format!("loading partition {}", args.partition.display()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let model = GraphModel::from_parts(graph, hierarchy, config.simulation, &mut rng)?;

    let mut session = Session::new(model, config.steps_per_frame);
    if let Some(level) = args.level {
        session.set_level(level);
    }
    let steps = session.run(args.frames);
    info!(frames = args.frames, steps, "layout finished");

    let snapshot = LayoutSnapshot::capture(session.model());
    match &args.output {
        Some(path) => snapshot
            .write(path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{}", snapshot.to_json()?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}
