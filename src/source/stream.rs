//! The partitioned sample stream.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};

use log::debug;

use crate::board::BoardState;
use crate::error::{Result, SourceError};
use crate::replay::{GameReplayer, Sample};

use super::compact;
use super::config::{Split, StreamConfig, WorkerShard};
use super::sgf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// JSON lines: one game per line; game index = line number within the
    /// lexically-ordered concatenated stream.
    Compact,
    /// One SGF file per game; game index = file index within the file list.
    Sgf,
}

/// Lazily streams `(features, action)` samples from source files for one
/// worker and one split.
///
/// Pull-based: no prefetching, one open file and one live board at a time,
/// everything released when the stream is dropped mid-corpus. Corrupt games
/// are skipped silently (debug-logged); I/O failures are structural and
/// yield one `Err` before fusing the stream.
pub struct SampleStream {
    config: StreamConfig,
    split: Split,
    shard: WorkerShard,
    format: Format,

    /// Next file to open.
    file_cursor: usize,
    /// Line reader for the current compact file.
    lines: Option<Lines<BufReader<File>>>,
    /// Compact game index, continuous across files.
    line_index: usize,
    /// Games examined by this worker, for `limit_games`.
    games_seen: usize,

    replayer: Option<GameReplayer>,
    done: bool,
}

impl SampleStream {
    /// Stream compact-format games (JSON lines).
    pub fn compact(
        config: StreamConfig,
        split: Split,
        shard: WorkerShard,
    ) -> Result<Self> {
        Self::new(config, split, shard, Format::Compact)
    }

    /// Stream SGF games, one file per game.
    pub fn sgf(
        config: StreamConfig,
        split: Split,
        shard: WorkerShard,
    ) -> Result<Self> {
        Self::new(config, split, shard, Format::Sgf)
    }

    fn new(
        mut config: StreamConfig,
        split: Split,
        shard: WorkerShard,
        format: Format,
    ) -> Result<Self> {
        // Reject a bad board size here, at configuration time, rather than
        // somewhere in the middle of the corpus.
        BoardState::new(config.board_size)?;
        config.files.sort();
        Ok(Self {
            config,
            split,
            shard,
            format,
            file_cursor: 0,
            lines: None,
            line_index: 0,
            games_seen: 0,
            replayer: None,
            done: false,
        })
    }

    /// Find the next owned, in-split, decodable game and install its
    /// replayer. `Ok(false)` means the corpus (or the `limit_games` cap) is
    /// exhausted.
    fn advance(&mut self) -> Result<bool> {
        loop {
            // The cap counts games examined, before any filtering, so a
            // smoke run stays cheap even when most games are filtered out.
            if let Some(limit) = self.config.limit_games {
                if self.games_seen >= limit {
                    return Ok(false);
                }
            }

            let (index, record) = match self.format {
                Format::Compact => {
                    let line = match self.next_line()? {
                        Some(line) => line,
                        None => return Ok(false),
                    };
                    let index = self.line_index;
                    self.line_index += 1;
                    self.games_seen += 1;
                    if !self.selected(index) {
                        continue;
                    }
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match compact::decode_game_line(trimmed) {
                        Ok(record) => (index, record),
                        Err(err) => {
                            debug!("skipping corrupt game at line index {index}: {err}");
                            continue;
                        }
                    }
                }
                Format::Sgf => {
                    let index = self.file_cursor;
                    let path = match self.config.files.get(index) {
                        Some(path) => path.clone(),
                        None => return Ok(false),
                    };
                    self.file_cursor += 1;
                    self.games_seen += 1;
                    if !self.selected(index) {
                        continue;
                    }
                    let bytes = std::fs::read(&path)?;
                    let text = String::from_utf8_lossy(&bytes);
                    match sgf::decode_sgf(&text, self.config.board_size) {
                        Ok(record) => (index, record),
                        Err(err) => {
                            debug!("skipping SGF file {}: {err}", path.display());
                            continue;
                        }
                    }
                }
            };

            debug_assert!(self.shard.owns(index));
            self.replayer = Some(GameReplayer::new(record, self.config.board_size)?);
            return Ok(true);
        }
    }

    fn selected(&self, index: usize) -> bool {
        self.shard.owns(index) && self.split.selects(index, self.config.val_ratio)
    }

    /// Next physical line of the concatenated compact stream, opening files
    /// in order as needed.
    fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(lines) = self.lines.as_mut() {
                match lines.next() {
                    Some(line) => return Ok(Some(line?)),
                    None => self.lines = None,
                }
            }
            let path = match self.config.files.get(self.file_cursor) {
                Some(path) => path.clone(),
                None => return Ok(None),
            };
            self.file_cursor += 1;
            let file = File::open(&path)?;
            self.lines = Some(BufReader::new(file).lines());
        }
    }
}

impl Iterator for SampleStream {
    type Item = std::result::Result<Sample, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if let Some(replayer) = self.replayer.as_mut() {
                if let Some(sample) = replayer.next() {
                    return Some(Ok(sample));
                }
                self.replayer = None;
            }
            match self.advance() {
                Ok(true) => continue,
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
