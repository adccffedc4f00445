use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use basepair_forge::io::read_pdb;
use basepair_forge::{find_pairs, FrameResult, PairingResult, Structure, ValidationParameters};

use crate::cli::{Command, FindArgs};
use crate::display;

pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Find(args) => run_find(args),
    }
}

#[derive(Serialize)]
struct Report<'a> {
    parameters: &'a ValidationParameters,
    residue_count: usize,
    frames_fitted: usize,
    selections: &'a [basepair_forge::Selection],
    pairs: &'a [basepair_forge::BasePair],
}

fn run_find(args: FindArgs) -> Result<()> {
    let structure = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open input file '{}'", path.display()))?;
            read_pdb(file).with_context(|| format!("failed to read '{}'", path.display()))?
        }
        None => read_pdb(io::stdin().lock()).context("failed to read structure from stdin")?,
    };

    let params = args.thresholds.to_parameters();
    let result = find_pairs(&structure, &params).context("pairing run failed")?;

    if !args.quiet {
        display::print_report(&structure, &result, args.selections);
    }

    if let Some(path) = &args.json {
        write_json_report(path, &structure, &params, &result)
            .with_context(|| format!("cannot write JSON report to '{}'", path.display()))?;
    }

    Ok(())
}

fn write_json_report(
    path: &std::path::Path,
    structure: &Structure,
    params: &ValidationParameters,
    result: &PairingResult,
) -> Result<()> {
    let report = Report {
        parameters: params,
        residue_count: structure.residue_count(),
        frames_fitted: count_fitted(&result.frames),
        selections: &result.selections,
        pairs: &result.pairs,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.write_all(b"\n")?;
    Ok(())
}

pub fn count_fitted(frames: &[FrameResult]) -> usize {
    frames.iter().filter(|f| f.is_valid()).count()
}
