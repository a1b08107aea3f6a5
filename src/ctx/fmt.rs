//! Contains the formatting logic for the [ScopeContext] struct.

use super::ScopeContext;
use crate::{
    constants::{EMPTY_CIRCLE, FILLED_CIRCLE, RIGHT_ARROW},
    settings::OutputFormat,
};
use anyhow::Result;
use itertools::Itertools;
use nu_ansi_term::{Color, Style};
use refscope::{
    remote::{PushStatus, RemoteBranchStatus},
    ConfigLookup, GitRef, RemoteDescription,
};
use serde::Serialize;
use std::fmt::{Display, Write};

impl<'a> ScopeContext<'a> {
    /// Prints a [RemoteDescription] in the configured [OutputFormat].
    pub fn print_remote(&self, remote: &RemoteDescription) -> Result<()> {
        let buf = match self.settings.format {
            OutputFormat::Text => {
                let mut buf = String::new();
                write_remote(&mut buf, remote, Painter(self.settings.color))?;
                buf
            }
            OutputFormat::Toml => toml::to_string_pretty(remote)?,
        };
        print!("{}", buf);
        Ok(())
    }

    /// Prints a listing of refs along with their tracking configuration, read from `config`.
    pub fn print_refs(&self, refs: &[GitRef], config: &impl ConfigLookup) -> Result<()> {
        let rows = refs
            .iter()
            .sorted_by(|a, b| a.complete_name().cmp(b.complete_name()))
            .map(|git_ref| RefRow::new(git_ref, config))
            .collect::<Vec<_>>();

        let buf = match self.settings.format {
            OutputFormat::Text => {
                let mut buf = String::new();
                write_refs(&mut buf, &rows, Painter(self.settings.color))?;
                buf
            }
            OutputFormat::Toml => toml::to_string_pretty(&RefListing { refs: rows })?,
        };
        print!("{}", buf);
        Ok(())
    }
}

/// Applies colors to text, unless coloring is disabled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Painter(pub(crate) bool);

impl Painter {
    fn paint(&self, style: impl Into<Style>, text: impl Display) -> String {
        if self.0 {
            style.into().paint(text.to_string()).to_string()
        } else {
            text.to_string()
        }
    }
}

/// A [GitRef] paired with the tracking configuration of the branch it names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct RefRow<'r> {
    #[serde(flatten)]
    git_ref: &'r GitRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracking_remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_with: Option<String>,
}

impl<'r> RefRow<'r> {
    /// Resolves the tracking configuration of local branches. Other refs have none.
    pub(crate) fn new(git_ref: &'r GitRef, config: &impl ConfigLookup) -> Self {
        let (tracking_remote, merge_with) = if git_ref.is_head() {
            (git_ref.tracking_remote(config), git_ref.merge_with(config))
        } else {
            (None, None)
        };
        Self {
            git_ref,
            tracking_remote,
            merge_with,
        }
    }
}

#[derive(Serialize)]
struct RefListing<'r> {
    refs: Vec<RefRow<'r>>,
}

/// Writes a human-readable rendering of a [RemoteDescription] to the given [Write]r.
pub(crate) fn write_remote<W: Write>(
    w: &mut W,
    remote: &RemoteDescription,
    painter: Painter,
) -> Result<()> {
    writeln!(w, "{}", painter.paint(Color::Blue.bold(), &remote.name))?;
    writeln!(
        w,
        "  fetch  {}",
        remote.fetch_url.as_deref().unwrap_or("(no URL)")
    )?;
    for url in &remote.push_urls {
        writeln!(w, "  push   {}", url)?;
    }

    let head = match (&remote.head_branch, remote.head_candidates.is_empty()) {
        (Some(head), _) => painter.paint(Color::Green, head),
        (None, false) => format!("ambiguous ({})", remote.head_candidates.iter().join(", ")),
        (None, true) => "unknown".to_string(),
    };
    writeln!(w, "  HEAD   {}", head)?;

    if !remote.remote_branches.is_empty() {
        writeln!(w, "  remote branches")?;
        let width = column_width(remote.remote_branches.iter().map(|b| b.name.as_str()));
        for branch in &remote.remote_branches {
            let icon = if remote.is_head(branch) {
                FILLED_CIRCLE
            } else {
                EMPTY_CIRCLE
            };
            let status = match branch.status {
                RemoteBranchStatus::Tracked => painter.paint(Color::Green, "tracked"),
                RemoteBranchStatus::Stale => painter.paint(Color::Red, "stale"),
                RemoteBranchStatus::New => painter.paint(Color::Yellow, "new"),
                RemoteBranchStatus::Unknown => "?".to_string(),
            };
            writeln!(w, "    {} {:<width$} {}", icon, branch.name, status)?;
        }
    }

    if !remote.pull_configs.is_empty() {
        writeln!(w, "  pull")?;
        let width = column_width(remote.pull_configs.iter().map(|c| c.local_branch.as_str()));
        for config in &remote.pull_configs {
            let mode = if config.mode.is_rebase() {
                painter.paint(Color::Purple, "rebase")
            } else {
                painter.paint(Color::Cyan, "merge")
            };
            writeln!(
                w,
                "    {:<width$} {} {} ({})",
                config.local_branch,
                RIGHT_ARROW,
                config.remote_branches.iter().join(", "),
                mode
            )?;
        }
    }

    if remote.is_mirror {
        writeln!(w, "  push   {}", painter.paint(Color::Yellow, "mirror"))?;
    } else if !remote.push_configs.is_empty() {
        writeln!(w, "  push")?;
        let width = column_width(remote.push_configs.iter().map(|c| c.local_branch.as_str()));
        for config in &remote.push_configs {
            let color = match config.status {
                PushStatus::UpToDate => Color::Green,
                PushStatus::FastForwardable => Color::Cyan,
                PushStatus::Create => Color::Yellow,
                PushStatus::Delete | PushStatus::LocalOutOfDate => Color::Red,
                PushStatus::NotQueried => Color::Default,
            };
            let forced = if config.forced { " (forced)" } else { "" };
            writeln!(
                w,
                "    {:<width$} {} {} ({}){}",
                config.local_branch,
                RIGHT_ARROW,
                config.remote_branch,
                painter.paint(color, config.status),
                forced
            )?;
        }
    }

    Ok(())
}

/// Writes a listing of refs to the given [Write]r, one ref per line.
pub(crate) fn write_refs<W: Write>(w: &mut W, rows: &[RefRow<'_>], painter: Painter) -> Result<()> {
    let width = column_width(rows.iter().map(|r| r.git_ref.short_name()));

    for row in rows {
        let kind = format!("{:<6}", row.git_ref.kind());
        let upstream = match (&row.tracking_remote, &row.merge_with) {
            (Some(remote), Some(merge)) => format!(" {} {}/{}", RIGHT_ARROW, remote, merge),
            (Some(remote), None) => format!(" {} {}", RIGHT_ARROW, remote),
            (None, Some(merge)) => format!(" {} {}", RIGHT_ARROW, merge),
            (None, None) => String::new(),
        };
        writeln!(
            w,
            "{} {:<width$}{}",
            painter.paint(Color::DarkGray, kind),
            row.git_ref.short_name(),
            painter.paint(Color::Cyan, upstream)
        )?;
    }

    Ok(())
}

fn column_width<'s>(names: impl Iterator<Item = &'s str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or_default()
}
