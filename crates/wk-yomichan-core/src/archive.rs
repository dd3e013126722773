//! Dictionary archive writer: JSON banks staged in a scratch dir, then zipped

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::dictionary::{DictionaryIndex, MetaEntry};

pub const INDEX_FILE: &str = "index.json";
pub const TERM_META_FILE: &str = "term_meta_bank_1.json";
pub const KANJI_META_FILE: &str = "kanji_meta_bank_1.json";

/// Zip writer with a scratch staging dir and atomic tmp→rename.
///
/// The scratch dir is removed when the sink is finalized or dropped, so it
/// never outlives a failed run.
pub struct ArchiveSink {
    scratch: TempDir,
    tmp_path: PathBuf,
    final_path: PathBuf,
    files: Vec<&'static str>,
}

impl std::fmt::Debug for ArchiveSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveSink")
            .field("final_path", &self.final_path)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

impl ArchiveSink {
    /// Create a sink that will produce `output_dir/file_name`
    pub fn new(output_dir: &Path, file_name: &str) -> io::Result<Self> {
        let scratch = tempfile::Builder::new().prefix("wk-yomichan-").tempdir()?;
        log::debug!("Staging archive in {}", scratch.path().display());
        Ok(Self {
            scratch,
            tmp_path: output_dir.join(format!("{file_name}.tmp")),
            final_path: output_dir.join(file_name),
            files: Vec::new(),
        })
    }

    pub fn scratch_path(&self) -> &Path {
        self.scratch.path()
    }

    /// Serialize `value` into the scratch dir as `name`
    pub fn write_json<T: Serialize + ?Sized>(
        &mut self,
        name: &'static str,
        value: &T,
    ) -> io::Result<()> {
        let path = self.scratch.path().join(name);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, value).map_err(io::Error::other)?;
        writer.flush()?;
        self.files.push(name);
        Ok(())
    }

    /// Zip staged files in write order, rename into place and drop the scratch dir
    pub fn finalize(self) -> io::Result<PathBuf> {
        // Clean up stale tmp file
        if self.tmp_path.exists() {
            fs::remove_file(&self.tmp_path)?;
        }

        if let Err(e) = self
            .write_zip()
            .and_then(|()| fs::rename(&self.tmp_path, &self.final_path))
        {
            let _ = fs::remove_file(&self.tmp_path);
            return Err(e);
        }

        let Self {
            scratch,
            final_path,
            ..
        } = self;
        scratch.close()?;
        Ok(final_path)
    }

    fn write_zip(&self) -> io::Result<()> {
        let mut zip = ZipWriter::new(File::create(&self.tmp_path)?);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for name in &self.files {
            zip.start_file(*name, options).map_err(io::Error::other)?;
            let mut staged = File::open(self.scratch.path().join(name))?;
            io::copy(&mut staged, &mut zip)?;
        }
        zip.finish().map_err(io::Error::other)?;
        Ok(())
    }
}

/// Write a complete dictionary archive and return its path
pub fn write_dictionary(
    output_dir: &Path,
    file_name: &str,
    index: &DictionaryIndex,
    terms: &[MetaEntry],
    kanji: &[MetaEntry],
) -> io::Result<PathBuf> {
    let mut sink = ArchiveSink::new(output_dir, file_name)?;
    sink.write_json(INDEX_FILE, index)?;
    sink.write_json(TERM_META_FILE, terms)?;
    sink.write_json(KANJI_META_FILE, kanji)?;
    sink.finalize()
}
