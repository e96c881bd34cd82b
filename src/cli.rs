//! Command line definition of the `routenet` binary

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use routenet::algo::{EulerStrategy, SpanningStrategy};
use routenet::analysis::Analysis;
use routenet::config::AnalysisConfig;
use routenet::prelude::*;

/// routenet - analyse logistics route networks
#[derive(Parser, Debug)]
#[command(name = "routenet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Route list file: a header `N M` followed by `M` lines `u v weight capacity`
    pub graph_file: PathBuf,

    /// Graph representation; auto applies the density rule
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub representation: RepresentationArg,

    /// TOML configuration file
    #[arg(long, global = true, env = "ROUTENET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory receiving the report logs (overrides the configuration)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Index of the graph, selects the log file `log_graphNN.txt`
    #[arg(long, global = true, default_value_t = 1)]
    pub graph_index: u32,

    /// Do not append the report to the log file
    #[arg(long, global = true)]
    pub no_log: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Values of `--representation`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepresentationArg {
    Auto,
    List,
    Matrix,
}

impl From<RepresentationArg> for Option<Representation> {
    fn from(arg: RepresentationArg) -> Self {
        match arg {
            RepresentationArg::Auto => None,
            RepresentationArg::List => Some(Representation::AdjacencyList),
            RepresentationArg::Matrix => Some(Representation::AdjacencyMatrix),
        }
    }
}

/// Values of `spanning-tree --strategy`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    Prim,
    Kruskal,
}

impl From<StrategyArg> for SpanningStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Prim => SpanningStrategy::Prim,
            StrategyArg::Kruskal => SpanningStrategy::Kruskal,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the loaded network
    Show,

    /// Find the cheapest route between two hubs (Dijkstra)
    ShortestPath {
        /// Origin hub
        #[arg(long)]
        from: Node,

        /// Destination hub
        #[arg(long)]
        to: Node,
    },

    /// Compute the maximum flow between two hubs (Edmonds-Karp)
    MaxFlow {
        /// Source hub
        #[arg(long)]
        source: Node,

        /// Sink hub
        #[arg(long)]
        sink: Node,
    },

    /// Compute a minimum spanning tree (prim or kruskal)
    SpanningTree {
        /// Strategy; defaults to the one matching the representation
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },

    /// Plan maintenance rounds of conflicting routes (Welsh-Powell)
    Schedule,

    /// Inspect Eulerian and Hamiltonian properties
    Inspect {
        /// Build Eulerian trails with Fleury's algorithm
        #[arg(long)]
        fleury: bool,

        /// Only accept Hamiltonian paths that close into a cycle
        #[arg(long)]
        require_cycle: bool,
    },
}

impl Cli {
    /// Returns the forced representation, `None` if the density rule applies
    pub fn representation(&self) -> Option<Representation> {
        self.representation.into()
    }

    /// Loads the configuration file (if any) and applies the command line overrides
    pub fn config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }

        if let Commands::Inspect {
            fleury,
            require_cycle,
        } = self.command
        {
            if fleury {
                config.euler_strategy = EulerStrategy::Fleury;
            }
            if require_cycle {
                config.require_hamiltonian_cycle = true;
            }
        }

        Ok(config)
    }
}

impl Commands {
    /// Translates the subcommand into the analysis it requests
    pub fn analysis(&self) -> Analysis<Node> {
        match self {
            Commands::Show => Analysis::Overview,
            Commands::ShortestPath { from, to } => Analysis::ShortestPath {
                origin: *from,
                destination: *to,
            },
            Commands::MaxFlow { source, sink } => Analysis::MaxFlow {
                source: *source,
                sink: *sink,
            },
            Commands::SpanningTree { strategy } => Analysis::SpanningTree {
                strategy: strategy.map(SpanningStrategy::from),
            },
            Commands::Schedule => Analysis::MaintenanceSchedule,
            Commands::Inspect { .. } => Analysis::Inspection,
        }
    }
}
