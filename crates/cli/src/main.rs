use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{command, Arg};
use log::info;

fn main() -> Result<()> {
    let matches = command!()
        .max_term_width(100)
        .arg(
            Arg::new("file")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The archive or fat archive to normalize in place"),
        )
        .get_matches();

    env_logger::Builder::new()
        .format_level(false)
        .format_target(false)
        .filter_module("arstamp", log::LevelFilter::Info)
        .init();

    let path = matches.get_one::<PathBuf>("file").unwrap();

    let file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .with_context(|| format!("Could not open archive '{}'", path.display()))?;
    let archive = arstamp::ArchiveFile::new(file)
        .with_context(|| format!("Could not read archive '{}'", path.display()))?;
    let slices = archive
        .slices()
        .with_context(|| format!("Not a valid archive '{}'", path.display()))?;

    for slice in slices {
        let slice = slice.with_context(|| format!("Not a valid archive '{}'", path.display()))?;
        let date = arstamp::normalize_slice(&slice)
            .with_context(|| format!("Could not update archive '{}'", path.display()))?;
        info!(
            "Set first member date to {} in archive at {:#x}",
            date,
            slice.base_offset()
        );
    }
    Ok(())
}
