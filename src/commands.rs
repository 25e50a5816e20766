//! # Command registry
//!
//! The closed set of operations exposed to outer callers (command-line front ends,
//! plotting scripts). A [`Command`] is resolved by name through [`Command::REGISTRY`]
//! and run against a [`Case`]; argument parsing and rendering stay with the caller.
//!
//! | Name         | Output                                                  |
//! |--------------|---------------------------------------------------------|
//! | `variables`  | variable names of every field snapshot                  |
//! | `zones`      | zones of every field snapshot                           |
//! | `timesteps`  | union of the `tsId`s of every segment                   |
//! | `series`     | merged, time-filtered columns of one channel            |
//! | `continuity` | continuity report of one merged channel                 |
//! | `stats`      | summary statistics of one merged channel                |
//!
//! ```rust, ignore
//! use simhist::commands::{Command, CommandArgs};
//!
//! let command: Command = "zones".parse()?;
//! let report = command.run(&case, &CommandArgs::default(), Diagnostics::global())?;
//! println!("{report}");
//! ```
use std::{fmt, str::FromStr};

use camino::Utf8PathBuf;
use itertools::Itertools;

use crate::case::Case;
use crate::constants::{Seconds, TsId};
use crate::diagnostics::Diagnostics;
use crate::query::{filter_by_time, summary_stats, ContinuityReport, SeriesStats};
use crate::simhist_errors::SimhistError;
use crate::tagged_binary::Zone;
use crate::time_history::{Channel, SeriesColumns, SeriesMerger, TimeHistorySeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Variables,
    Zones,
    Timesteps,
    Series,
    Continuity,
    Stats,
}

/// Inputs of the channel commands. Snapshot commands ignore them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommandArgs {
    pub channel: Option<Channel>,
    pub start_time: Option<Seconds>,
    pub end_time: Option<Seconds>,
}

impl CommandArgs {
    pub fn for_channel(channel: Channel) -> Self {
        CommandArgs {
            channel: Some(channel),
            ..Default::default()
        }
    }

    pub fn time_range(mut self, start: Option<Seconds>, end: Option<Seconds>) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Variables(Vec<(Utf8PathBuf, Vec<String>)>),
    Zones(Vec<(Utf8PathBuf, Vec<Zone>)>),
    Timesteps(Vec<TsId>),
    Series(SeriesColumns),
    Continuity(ContinuityReport),
    Stats(SeriesStats),
}

/// Output of one command plus the files that could not be decoded.
#[derive(Debug)]
pub struct CommandReport {
    pub output: CommandOutput,
    pub failures: Vec<(Utf8PathBuf, SimhistError)>,
}

impl CommandReport {
    pub fn first_error(&self) -> Option<&SimhistError> {
        self.failures.first().map(|(_, err)| err)
    }
}

impl Command {
    /// Name → command table.
    pub const REGISTRY: &'static [(&'static str, Command)] = &[
        ("variables", Command::Variables),
        ("zones", Command::Zones),
        ("timesteps", Command::Timesteps),
        ("series", Command::Series),
        ("continuity", Command::Continuity),
        ("stats", Command::Stats),
    ];

    pub fn from_name(name: &str) -> Result<Self, SimhistError> {
        Self::REGISTRY
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, command)| *command)
            .ok_or_else(|| SimhistError::UnknownCommand(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        Self::REGISTRY
            .iter()
            .find(|(_, command)| command == self)
            .map_or("", |(n, _)| *n)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::REGISTRY.iter().map(|(n, _)| *n)
    }

    pub fn needs_channel(&self) -> bool {
        matches!(self, Command::Series | Command::Continuity | Command::Stats)
    }

    /// Run the command on `case`.
    ///
    /// Every file of the case is decoded independently; failures are collected in
    /// the report while the healthy files still contribute to the output.
    ///
    /// Return
    /// ----------
    /// * A [`CommandReport`].
    /// * [`SimhistError::InvalidParameter`] if a channel command has no channel.
    /// * Merge errors ([`SimhistError::NodeOutOfRange`],
    ///   [`SimhistError::ContinuityViolation`] in strict mode).
    pub fn run(
        &self,
        case: &Case,
        args: &CommandArgs,
        diagnostics: Diagnostics<'_>,
    ) -> Result<CommandReport, SimhistError> {
        diagnostics.debug(format_args!("running `{}` on {}", self.name(), case.root()));

        match self {
            Command::Variables | Command::Zones => Ok(self.run_snapshots(case, diagnostics)),
            Command::Timesteps => {
                let load = case.load_segments(diagnostics);
                let ts_ids = load
                    .segments
                    .iter()
                    .flat_map(|s| s.timesteps().iter().copied())
                    .sorted()
                    .dedup()
                    .collect();
                Ok(CommandReport {
                    output: CommandOutput::Timesteps(ts_ids),
                    failures: load.failures,
                })
            }
            Command::Series | Command::Continuity | Command::Stats => {
                let channel = args.channel.ok_or_else(|| {
                    SimhistError::InvalidParameter(format!(
                        "command `{}` needs a channel",
                        self.name()
                    ))
                })?;
                let load = case.load_segments(diagnostics);
                let merged = SeriesMerger::with_params(diagnostics, case.params())
                    .merge(&load.segments, channel)?
                    .series;
                let series = filter_by_time(&merged, args.start_time, args.end_time);
                Ok(CommandReport {
                    output: self.series_output(&series),
                    failures: load.failures,
                })
            }
        }
    }

    fn run_snapshots(&self, case: &Case, diagnostics: Diagnostics<'_>) -> CommandReport {
        let mut variables = Vec::new();
        let mut zones = Vec::new();
        let mut failures = Vec::new();

        for (file, result) in case.describe_snapshots(diagnostics) {
            match result {
                Ok(snapshot) => {
                    variables.push((
                        file.path.clone(),
                        snapshot
                            .header
                            .variable_names()
                            .into_iter()
                            .map(String::from)
                            .collect(),
                    ));
                    zones.push((file.path.clone(), snapshot.zones));
                }
                Err(err) => failures.push((file.path.clone(), err)),
            }
        }

        let output = match self {
            Command::Zones => CommandOutput::Zones(zones),
            _ => CommandOutput::Variables(variables),
        };
        CommandReport { output, failures }
    }

    fn series_output(&self, series: &TimeHistorySeries) -> CommandOutput {
        match self {
            Command::Continuity => CommandOutput::Continuity(ContinuityReport::from_series(series)),
            Command::Stats => CommandOutput::Stats(summary_stats(series)),
            _ => CommandOutput::Series(series.columns()),
        }
    }
}

impl FromStr for Command {
    type Err = SimhistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_name(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Variables(files) => {
                for (path, names) in files {
                    writeln!(f, "{path}")?;
                    for (i, name) in names.iter().enumerate() {
                        writeln!(f, "  {i}: {name}")?;
                    }
                }
                Ok(())
            }
            CommandOutput::Zones(files) => {
                for (path, zones) in files {
                    writeln!(f, "{path}")?;
                    for (i, zone) in zones.iter().enumerate() {
                        writeln!(f, "  zone {i}: {zone}")?;
                    }
                }
                Ok(())
            }
            CommandOutput::Timesteps(ts_ids) => {
                writeln!(f, "{} timesteps", ts_ids.len())?;
                if !ts_ids.is_empty() {
                    writeln!(f, "{}", ts_ids.iter().join(" "))?;
                }
                Ok(())
            }
            CommandOutput::Series(columns) => {
                write!(f, "{:>10} {:>14}", "ts_id", "time")?;
                for name in columns.column_names() {
                    write!(f, " {name:>14}")?;
                }
                writeln!(f)?;
                for (row, (ts_id, time)) in columns.ts_ids.iter().zip(&columns.times).enumerate()
                {
                    write!(f, "{ts_id:>10} {time:>14.6e}")?;
                    for column in &columns.columns {
                        write!(f, " {:>14.6e}", column.values[row])?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            CommandOutput::Continuity(report) => write!(f, "{report}"),
            CommandOutput::Stats(stats) => write!(f, "{stats}"),
        }
    }
}

impl fmt::Display for CommandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.output)?;
        for (path, err) in &self.failures {
            writeln!(f, "failed: {path}: {err}")?;
        }
        Ok(())
    }
}
