use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Input graph encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    /// `# type:u|d edges:N` header followed by `src,dest,weight` lines
    EdgeList,
    /// `nVtx nEdges weightType` header followed by one line per vertex
    Adjacency,
}

impl GraphFormat {
    pub fn format_id(self) -> &'static str {
        match self {
            GraphFormat::EdgeList => "edge-list",
            GraphFormat::Adjacency => "adjacency",
        }
    }
}

/// Force-directed layout of a weighted graph with community coloring.
#[derive(Parser, Debug)]
#[command(name = "netviz")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Graph file (edge-list CSV or adjacency list)
    #[arg(short, long)]
    pub edges: PathBuf,

    /// Community partition file, one row per vertex, one column per level
    #[arg(short, long)]
    pub partition: PathBuf,

    /// Graph encoding; detected from the header when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<GraphFormat>,

    /// YAML file with force constants and pacing
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value = "100")]
    pub frames: usize,

    /// Simulation steps per frame (overrides the config file)
    #[arg(long)]
    pub steps_per_frame: Option<usize>,

    /// Seed for the initial placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hierarchy level used for coloring (clamped)
    #[arg(short, long)]
    pub level: Option<usize>,

    /// Write the layout snapshot here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_defaults() {
        let args = Args::try_parse_from(["netviz", "-e", "g.csv", "-p", "g.part"]).unwrap();

        assert_eq!(args.edges, PathBuf::from("g.csv"));
        assert_eq!(args.partition, PathBuf::from("g.part"));
        assert_eq!(args.frames, 100);
        assert!(args.format.is_none());
        assert!(args.config.is_none());
        assert!(args.steps_per_frame.is_none());
        assert!(args.seed.is_none());
        assert!(args.level.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn parses_all_options() {
        let args = Args::try_parse_from([
            "netviz",
            "--edges",
            "g.graph",
            "--partition",
            "g.part",
            "--format",
            "adjacency",
            "--config",
            "layout.yaml",
            "--frames",
            "5",
            "--steps-per-frame",
            "3",
            "--seed",
            "42",
            "--level",
            "1",
            "--output",
            "out.json",
        ])
        .unwrap();

        assert_eq!(args.format, Some(GraphFormat::Adjacency));
        assert_eq!(args.config, Some(PathBuf::from("layout.yaml")));
        assert_eq!(args.frames, 5);
        assert_eq!(args.steps_per_frame, Some(3));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.level, Some(1));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn requires_partition() {
        assert!(Args::try_parse_from(["netviz", "-e", "g.csv"]).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        let result =
            Args::try_parse_from(["netviz", "-e", "g.csv", "-p", "g.part", "-f", "graphml"]);
        assert!(result.is_err());
    }

    #[test]
    fn format_ids_match_readers() {
        assert_eq!(GraphFormat::EdgeList.format_id(), "edge-list");
        assert_eq!(GraphFormat::Adjacency.format_id(), "adjacency");
    }
}
