use super::App;
use crate::services::DevContainerRequest;
use anyhow::{Context, Result};
use std::io::Write;

/// Prints the derived specification (JSON) and the equivalent `run` command for `source`.
pub fn run<W: Write>(app: &App, source: &str, output: &mut W) -> Result<()> {
    let request = DevContainerRequest {
        source: source.to_string(),
        dev_name: String::new(),
        swap_dir: None,
        debugger: false,
        inject: None,
    };
    let plan = app.orchestrator.plan(&request)?;

    let json = serde_json::to_string_pretty(&plan.spec).context("serializando especificação")?;
    writeln!(output, "{json}")?;
    writeln!(output, "\n{} run -d {}", app.settings().binary, plan.rendered())?;

    Ok(())
}
