use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use notever_diff::{payload, DiffEngine, DiffKind, EditScript};

use crate::cli::*;
use crate::config::load_engine_config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let engine = DiffEngine::new(load_engine_config(cli.config.as_deref())?);
    match cli.command {
        Command::Diff(args) => cmd_diff(&engine, args),
        Command::Apply(args) => cmd_apply(&engine, args),
        Command::Inspect(args) => cmd_inspect(args, cli.format),
        Command::Check(args) => cmd_check(&engine, args, cli.format),
        Command::Replay(args) => cmd_replay(&engine, args),
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn cmd_diff(engine: &DiffEngine, args: DiffArgs) -> anyhow::Result<()> {
    let old = read_text(&args.old)?;
    let new = read_text(&args.new)?;
    let script = engine.try_generate(&old, &new)?;
    let encoded = payload::encode(&script)?;
    match args.output {
        Some(path) => {
            fs::write(&path, &encoded).with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} {} ops, {} to {}",
                "✓".green().bold(),
                script.len(),
                distance_summary(&script),
                path.display()
            );
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

fn cmd_apply(engine: &DiffEngine, args: ApplyArgs) -> anyhow::Result<()> {
    let base = read_text(&args.base)?;
    let diff_payload = read_text(&args.payload)?;
    let text = if args.lenient {
        engine.apply_diff(&base, &diff_payload)
    } else {
        engine
            .try_apply(&base, &diff_payload)
            .with_context(|| format!("applying {}", args.payload.display()))?
    };
    print!("{text}");
    Ok(())
}

fn cmd_inspect(args: InspectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let script = payload::decode(&read_text(&args.payload)?)?;
    print!("{}", render_script(&script, format)?);
    Ok(())
}

fn cmd_check(engine: &DiffEngine, args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let text = read_text(&args.file)?;
    println!("{}", render_check(engine, &text, format)?);
    Ok(())
}

fn cmd_replay(engine: &DiffEngine, args: ReplayArgs) -> anyhow::Result<()> {
    let mut text = read_text(&args.base)?;
    for path in &args.payloads {
        text = engine
            .try_apply(&text, &read_text(path)?)
            .with_context(|| format!("applying {}", path.display()))?;
    }
    print!("{text}");
    Ok(())
}

fn distance_summary(script: &EditScript) -> String {
    format!(
        "{} {}",
        format!("+{}", script.inserted_chars()).green(),
        format!("-{}", script.deleted_chars()).red()
    )
}

fn render_script(script: &EditScript, format: OutputFormat) -> anyhow::Result<String> {
    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(script)?));
    }
    if script.is_noop() {
        return Ok("No changes.\n".to_string());
    }
    let mut out = String::new();
    for op in script {
        let line = match op.kind {
            DiffKind::Insert => format!("+ @{:<6} {:?}", op.position, op.text).green(),
            DiffKind::Delete => format!("- @{:<6} {:?}", op.position, op.text).red(),
        };
        out.push_str(&format!("{line}\n"));
    }
    out.push_str(&format!("{} ops, {}\n", script.len(), distance_summary(script)));
    Ok(out)
}

fn render_check(engine: &DiffEngine, text: &str, format: OutputFormat) -> anyhow::Result<String> {
    let chars = text.chars().count();
    let threshold = engine.config().diff_threshold;
    let use_diff = engine.should_use_diff_storage(text);
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string(&serde_json::json!({
            "chars": chars,
            "threshold": threshold,
            "diff_storage": use_diff,
        }))?);
    }
    let decision = if use_diff {
        "diff".cyan().bold()
    } else {
        "snapshot".yellow().bold()
    };
    Ok(format!("{chars} chars (threshold {threshold}): store as {decision}"))
}
