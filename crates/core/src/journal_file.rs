//! Turn journals on disk as JSON lines linked by a SHA-256 chain.
//!
//! The first line is the [`JournalHeader`]. Every following line is one
//! [`TurnRecord`] extended with `prev_sha256_hex` and `sha256_hex`, where
//! `sha256_hex = hex(SHA-256(record_json || prev_sha256_hex))` and the first
//! record chains from an all-zero hash. Each line is flushed as soon as it is
//! written, so an interrupted run leaves a loadable prefix behind.

use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::journal::{JournalHeader, TurnJournal, TurnRecord};

const GENESIS_SHA256_HEX: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize)]
struct ChainedRecord {
    #[serde(flatten)]
    turn: TurnRecord,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Running tail of the hash chain.
struct HashChain {
    tail: String,
}

impl HashChain {
    fn new() -> Self {
        Self { tail: GENESIS_SHA256_HEX.to_string() }
    }

    fn link(&self, turn: &TurnRecord) -> serde_json::Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_string(turn)?.as_bytes());
        hasher.update(self.tail.as_bytes());
        Ok(format!("{:064x}", hasher.finalize()))
    }
}

/// Appends turns to a journal file as they are played.
pub struct JournalWriter {
    out: BufWriter<File>,
    chain: HashChain,
}

impl JournalWriter {
    /// Creates (or truncates) `path` and writes the header line.
    pub fn create(path: &Path, header: &JournalHeader) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut writer = Self { out: BufWriter::new(File::create(path)?), chain: HashChain::new() };
        writer.write_line(header)?;
        Ok(writer)
    }

    pub fn append(&mut self, turn: &TurnRecord) -> io::Result<()> {
        let sha256_hex = self.chain.link(turn).map_err(io::Error::other)?;
        let record = ChainedRecord {
            turn: turn.clone(),
            prev_sha256_hex: self.chain.tail.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        self.write_line(&record)?;
        self.chain.tail = sha256_hex;
        Ok(())
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value).map_err(io::Error::other)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

pub fn write_journal_to_file(path: &Path, journal: &TurnJournal) -> io::Result<()> {
    let mut writer = JournalWriter::create(path, &journal.header)?;
    journal.turns.iter().try_for_each(|turn| writer.append(turn))
}

/// Why a journal file was rejected. Line numbers start at 1 for the header.
#[derive(Debug)]
pub enum JournalLoadError {
    Io(io::Error),
    EmptyFile,
    InvalidHeader { line: usize, message: String },
    /// Malformed JSON, or a `seq` that does not continue the previous record.
    InvalidRecord { line: usize, message: String },
    /// The last line has no terminating newline.
    IncompleteLine { line: usize },
    /// A stored hash does not match its predecessor or its recomputed value.
    HashChainBroken { line: usize },
}

impl fmt::Display for JournalLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read journal: {e}"),
            Self::EmptyFile => write!(f, "journal has no header"),
            Self::InvalidHeader { line, message } => {
                write!(f, "line {line}: bad journal header: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "line {line}: bad turn record: {message}")
            }
            Self::IncompleteLine { line } => write!(f, "line {line}: truncated"),
            Self::HashChainBroken { line } => write!(f, "line {line}: hash chain mismatch"),
        }
    }
}

impl Error for JournalLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Reads a journal written by [`JournalWriter`], rejecting it at the first
/// malformed, truncated or tampered line.
pub fn load_journal_from_file(path: &Path) -> Result<TurnJournal, JournalLoadError> {
    let content = fs::read_to_string(path).map_err(JournalLoadError::Io)?;
    let mut lines = content.split_inclusive('\n').enumerate().map(|(i, raw)| (i + 1, raw));

    let Some((_, first)) = lines.next() else {
        return Err(JournalLoadError::EmptyFile);
    };
    let header_json = complete_line(1, first)?;
    let header: JournalHeader = serde_json::from_str(header_json)
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;

    let mut journal = TurnJournal::new(header);
    let mut chain = HashChain::new();
    for (line, raw) in lines {
        let invalid = |message: String| JournalLoadError::InvalidRecord { line, message };

        let record: ChainedRecord =
            serde_json::from_str(complete_line(line, raw)?).map_err(|e| invalid(e.to_string()))?;
        let expected_seq = journal.turns.len() as u64;
        if record.turn.seq != expected_seq {
            return Err(invalid(format!("seq {} where {expected_seq} was due", record.turn.seq)));
        }
        let recomputed = chain.link(&record.turn).map_err(|e| invalid(e.to_string()))?;
        if record.prev_sha256_hex != chain.tail || record.sha256_hex != recomputed {
            return Err(JournalLoadError::HashChainBroken { line });
        }

        chain.tail = record.sha256_hex;
        journal.turns.push(record.turn);
    }
    Ok(journal)
}

fn complete_line(line: usize, raw: &str) -> Result<&str, JournalLoadError> {
    raw.strip_suffix('\n').ok_or(JournalLoadError::IncompleteLine { line })
}
