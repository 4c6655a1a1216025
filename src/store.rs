use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::config::Config;
use crate::record::GameRecord;
use crate::{debug_time, warn_time, Error, Result};

/// What a run finds at the output path before scraping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeState {
    NoPriorData,
    PriorDataPresent { records: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate and write the header first.
    CreateNew,
    /// Add records after the existing ones.
    Append,
}

impl ResumeState {
    /// Pages already stored. Only complete pages count.
    pub fn resume_page(&self, page_size: usize) -> usize {
        match self {
            ResumeState::NoPriorData => 0,
            ResumeState::PriorDataPresent { records } => records / page_size.max(1),
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        match self {
            ResumeState::NoPriorData => WriteMode::CreateNew,
            ResumeState::PriorDataPresent { .. } => WriteMode::Append,
        }
    }
}

/// Looks at the output file once and decides where this run starts.
/// A file without a header line, or with only whitespace in it, counts as no data at all.
pub fn check_previous(config: &Config) -> Result<ResumeState> {
    let path = &config.output;
    if !path.is_file() {
        debug_time!(config.debug, "No previous scraped data found. Starting from page 1...");
        return Ok(ResumeState::NoPriorData);
    }
    debug_time!(
        config.debug,
        "Previous scraped data found in {}. Continuing from last page scraped...",
        path.display()
    );

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    if headers.iter().all(|field| field.trim().is_empty()) {
        warn_time!("Previous scraped data found but it is empty. Starting from page 1...");
        return Ok(ResumeState::NoPriorData);
    }
    if headers.iter().ne(GameRecord::HEADER) {
        return Err(Error::OutputHeaderMismatch {
            path: path.clone(),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut records = 0;
    for record in reader.records() {
        record?;
        records += 1;
    }
    debug_time!(config.debug, "Found {} stored records", records);

    Ok(ResumeState::PriorDataPresent { records })
}

/// Writes `records` to the output file. `Append` never rewrites what is already there.
pub fn write_records(config: &Config, records: &[GameRecord], mode: WriteMode) -> Result<()> {
    let path = &config.output;
    let file = match mode {
        WriteMode::CreateNew => {
            ensure_parent_dir(path)?;
            File::create(path)?
        }
        WriteMode::Append => {
            let mut file = OpenOptions::new().read(true).append(true).open(path)?;
            if !ends_with_newline(&mut file)? {
                file.write_all(b"\n")?;
            }
            file
        }
    };

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if mode == WriteMode::CreateNew {
        writer.write_record(GameRecord::HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug_time!(
        config.debug,
        "Wrote {} records to '{}' ({:?})",
        records.len(),
        path.display(),
        mode
    );
    Ok(())
}

/// Reads a whole output table back.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<GameRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let records = reader.deserialize::<GameRecord>().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// Empty files count as terminated.
fn ends_with_newline(file: &mut File) -> Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
