use crate::{Plan, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Renders plans as Graphviz DOT graphs
#[derive(Debug, Default, Clone, Copy)]
pub struct PlanVisualizer;

impl PlanVisualizer {
    /// Create a new plan visualizer
    pub fn new() -> Self {
        Self
    }

    /// Write a DOT file for `plan` at `path`
    pub fn visualize_plan(&self, plan: &Plan, path: impl AsRef<Path>) -> Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_dot(plan, &mut file)?;
        file.flush()?;
        Ok(())
    }

    /// Write the DOT rendering of `plan` to any writer
    pub fn write_dot<W: Write>(&self, plan: &Plan, out: &mut W) -> Result<()> {
        writeln!(out, "digraph Plan {{")?;
        writeln!(out, "    rankdir=LR;")?;
        writeln!(out, "    node [shape=box, style=filled, fillcolor=lightblue];")?;
        writeln!(out, "    edge [fontsize=10];")?;

        for (i, step) in plan.steps.iter().enumerate() {
            let fill = if i == 0 { ", fillcolor=lightgreen" } else { "" };
            writeln!(
                out,
                "    state_{} [label=\"{}\"{}];",
                i,
                Self::escape(&step.state.to_string()),
                fill
            )?;
        }
        let last = plan.steps.len();
        writeln!(
            out,
            "    state_{} [label=\"{}\", fillcolor=lightpink];",
            last,
            Self::escape(&plan.final_state.to_string())
        )?;

        for (i, step) in plan.steps.iter().enumerate() {
            writeln!(
                out,
                "    state_{} -> state_{} [label=\"{}\"];",
                i,
                i + 1,
                Self::escape(&step.action)
            )?;
        }

        writeln!(out, "}}")?;
        Ok(())
    }

    fn escape(text: &str) -> String {
        text.replace('\\', "\\\\").replace('"', "\\\"")
    }
}
