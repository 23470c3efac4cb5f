//! Insertion stress runner
//!
//! This module provides the `stress` subcommand: it builds a tree from a
//! generated insertion workload, validates every invariant, and reports the
//! resulting shape against the `2 * log2(n + 1)` height bound.

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use redblack::RedBlackTree;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const DEFAULT_SIZE: usize = 10_000;
const DEFAULT_SEED: u64 = 42;

/// Arguments for the stress subcommand
#[derive(Args, Debug, Default)]
pub struct StressArgs {
    /// Scenario YAML file path
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Override insertion pattern
    #[arg(long, value_enum)]
    pub pattern: Option<Pattern>,

    /// Override number of inserts
    #[arg(long)]
    pub size: Option<usize>,

    /// Random seed for reproducible workloads
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Order in which values are fed to the tree
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// 0, 1, 2, ...: every insert lands on the right spine
    Ascending,
    /// n-1, n-2, ...: every insert lands on the left spine
    Descending,
    /// A seeded shuffle of 0..n
    #[default]
    Random,
    /// 0, n-1, 1, n-2, ...: alternates between both spines
    Zigzag,
    /// Seeded draws from a small range of distinct values
    Duplicates,
}

/// Report output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Scenario configuration from YAML
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioConfig {
    name: Option<String>,
    pattern: Option<Pattern>,
    size: Option<usize>,
    seed: Option<u64>,
    distinct_values: Option<usize>,
}

/// Fully resolved workload
#[derive(Debug, PartialEq, Eq)]
struct StressPlan {
    name: String,
    pattern: Pattern,
    size: usize,
    seed: u64,
    distinct_values: usize,
}

impl StressPlan {
    /// Resolve the plan from CLI arguments, environment and scenario.
    ///
    /// Priority: CLI > Environment > Scenario YAML > Default
    fn resolve(
        args: &StressArgs,
        scenario: &ScenarioConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let pattern_from_env = lookup("STRESS_PATTERN")
            .map(|raw| {
                Pattern::from_str(&raw, true)
                    .map_err(|message| anyhow!("invalid STRESS_PATTERN={raw}: {message}"))
            })
            .transpose()?;
        let size_from_env = lookup("STRESS_SIZE")
            .map(|raw| {
                raw.parse::<usize>()
                    .with_context(|| format!("invalid STRESS_SIZE={raw}"))
            })
            .transpose()?;
        let seed_from_env = lookup("STRESS_SEED")
            .map(|raw| {
                raw.parse::<u64>()
                    .with_context(|| format!("invalid STRESS_SEED={raw}"))
            })
            .transpose()?;

        let pattern = args
            .pattern
            .or(pattern_from_env)
            .or(scenario.pattern)
            .unwrap_or_default();
        let size = args
            .size
            .or(size_from_env)
            .or(scenario.size)
            .unwrap_or(DEFAULT_SIZE);
        let seed = args
            .seed
            .or(seed_from_env)
            .or(scenario.seed)
            .unwrap_or(DEFAULT_SEED);
        let distinct_values = scenario
            .distinct_values
            .unwrap_or_else(|| (size / 10).max(1));
        if distinct_values == 0 {
            bail!("distinct_values must be at least 1");
        }

        let name = scenario
            .name
            .clone()
            .unwrap_or_else(|| format!("{pattern:?}-{size}").to_lowercase());

        Ok(Self {
            name,
            pattern,
            size,
            seed,
            distinct_values,
        })
    }

    /// Generate the insertion sequence.
    fn workload(&self) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        match self.pattern {
            Pattern::Ascending => (0..self.size).collect(),
            Pattern::Descending => (0..self.size).rev().collect(),
            Pattern::Random => {
                let mut values: Vec<usize> = (0..self.size).collect();
                values.shuffle(&mut rng);
                values
            }
            Pattern::Zigzag => {
                let mut low = 0;
                let mut high = self.size;
                (0..self.size)
                    .map(|step| {
                        if step % 2 == 0 {
                            low += 1;
                            low - 1
                        } else {
                            high -= 1;
                            high
                        }
                    })
                    .collect()
            }
            Pattern::Duplicates => (0..self.size)
                .map(|_| rng.gen_range(0..self.distinct_values))
                .collect(),
        }
    }
}

/// Shape statistics of one stress run
#[derive(Debug, Serialize)]
struct StressReport {
    name: String,
    pattern: Pattern,
    size: usize,
    height: usize,
    bound: f64,
    black_height: usize,
    elapsed_ms: f64,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<String>,
}

impl StressReport {
    fn new(plan: &StressPlan, tree: &RedBlackTree<usize>, elapsed: Duration) -> Self {
        let violation = tree.validate().err().map(|violation| violation.to_string());
        Self {
            name: plan.name.clone(),
            pattern: plan.pattern,
            size: tree.len(),
            height: tree.height(),
            bound: height_bound(tree.len()),
            black_height: tree.black_height(),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            valid: violation.is_none(),
            violation,
        }
    }

    fn within_bound(&self) -> bool {
        self.height as f64 <= self.bound
    }

    fn render(&self, format: Format) -> Result<String> {
        match format {
            Format::Json => serde_json::to_string_pretty(self).context("Failed to encode report as JSON"),
            Format::Yaml => serde_yaml::to_string(self).context("Failed to encode report as YAML"),
            Format::Text => {
                let mut lines = vec![
                    format!("Scenario:     {}", self.name),
                    format!("Pattern:      {:?}", self.pattern),
                    format!("Size:         {}", self.size),
                    format!("Height:       {} (bound {:.2})", self.height, self.bound),
                    format!("Black height: {}", self.black_height),
                    format!("Elapsed:      {:.3} ms", self.elapsed_ms),
                    format!("Valid:        {}", self.valid),
                ];
                if let Some(violation) = &self.violation {
                    lines.push(format!("Violation:    {violation}"));
                }
                Ok(lines.join("\n"))
            }
        }
    }
}

/// Maximum height of a red-black tree holding `size` values.
fn height_bound(size: usize) -> f64 {
    2.0 * ((size + 1) as f64).log2()
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse scenario YAML: {}", path.display()))
}

/// Run the stress subcommand
pub fn run(args: StressArgs) -> Result<()> {
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => ScenarioConfig::default(),
    };
    let plan = StressPlan::resolve(&args, &scenario, |name| env::var(name).ok())?;
    info!(
        name = %plan.name,
        pattern = ?plan.pattern,
        size = plan.size,
        seed = plan.seed,
        "Starting stress run"
    );

    let values = plan.workload();
    debug!(generated = values.len(), "Workload generated");

    let started = Instant::now();
    let mut tree = RedBlackTree::with_capacity(values.len());
    tree.extend(values);
    let elapsed = started.elapsed();

    let report = StressReport::new(&plan, &tree, elapsed);
    println!("{}", report.render(args.format)?);

    if let Some(violation) = &report.violation {
        bail!("Tree invalid after {} inserts: {violation}", plan.size);
    }
    if tree.len() != plan.size {
        bail!("Tree holds {} values after {} inserts", tree.len(), plan.size);
    }
    if !report.within_bound() {
        warn!(height = report.height, bound = report.bound, "Height bound exceeded");
        bail!(
            "Height {} exceeds bound {:.2} for {} values",
            report.height,
            report.bound,
            report.size
        );
    }

    info!(height = report.height, elapsed_ms = report.elapsed_ms, "Stress run passed");
    Ok(())
}
