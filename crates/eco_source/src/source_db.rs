//! Storage for the loaded input files.

use crate::span::{FileId, ResolvedSpan, Span};
use std::io;
use std::path::{Path, PathBuf};

/// One loaded input file with a line-start table for location lookup.
pub struct SourceFile {
    /// ID of this file within its [`SourceDb`].
    pub id: FileId,
    /// Path on disk, or a synthetic name for in-memory inputs.
    pub path: PathBuf,
    /// Full file text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset to 1-indexed `(line, column)`.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (idx as u32 + 1, offset - self.line_starts[idx] + 1)
    }

    /// Returns the full text of the line containing `offset`, without the newline.
    pub fn line_text(&self, offset: u32) -> &str {
        let (line, _) = self.line_col(offset);
        let start = self.line_starts[line as usize - 1] as usize;
        let end = self
            .line_starts
            .get(line as usize)
            .map_or(self.content.len(), |&next| next as usize);
        self.content[start..end].trim_end_matches(['\n', '\r'])
    }

    /// Iterates over `(byte offset of line start, line text)` pairs.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> {
        self.line_starts
            .iter()
            .map(move |&start| (start, self.line_text(start)))
            .filter(move |&(start, _)| (start as usize) < self.content.len())
    }
}

/// All input files of one evaluation run.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads a file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds in-memory text under the given display name.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID did not come from this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves a span to its starting line and column.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (line, col) = file.line_col(span.start);
        ResolvedSpan {
            file_path: file.path.clone(),
            line,
            col,
        }
    }

    /// Returns the text covered by a span.
    pub fn snippet(&self, span: Span) -> &str {
        &self.get_file(span.file).content[span.start as usize..span.end as usize]
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
