use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};

use gcode_post::config::Config;
use gcode_post::dialect::DialectRegistry;
use gcode_post::export::{export, write_document, PathObject};

fn main() -> Result<()> {
    // Parse configuration from command line and project config
    let config = Config::from_args_and_env()?;

    let env = env_logger::Env::default().default_filter_or(config.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    let registry = DialectRegistry::from_config(&config)?;

    if config.list_dialects {
        let mut stdout = io::stdout().lock();
        for name in registry.list_dialects() {
            let description = registry
                .get(name)
                .and_then(|d| d.description.as_deref())
                .unwrap_or("");
            writeln!(stdout, "{:<16} {}", name, description)?;
        }
        return Ok(());
    }

    let mut dialect = registry.require(config.effective_dialect())?.clone();
    if let Some(enabled) = config.line_comments {
        dialect = dialect.with_line_comments(enabled);
    }

    // Inputs are read only when there is exactly one to export
    let objects = match config.inputs.as_slice() {
        [path] => vec![read_object(path)?],
        paths => paths
            .iter()
            .map(|path| PathObject::without_path(path.display().to_string()))
            .collect(),
    };

    let document = export(&objects, &dialect)?;

    match &config.output {
        Some(path) => write_document(path, &document)?,
        None => io::stdout()
            .lock()
            .write_all(document.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}

/// Read one input file (`-` for stdin) as a path object
fn read_object(path: &Path) -> Result<PathObject> {
    if path == Path::new("-") {
        let mut gcode = String::new();
        io::stdin()
            .read_to_string(&mut gcode)
            .context("Failed to read G-code from stdin")?;
        return Ok(PathObject::new("<stdin>", gcode));
    }

    let gcode = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    Ok(PathObject::new(path.display().to_string(), gcode))
}
