use crate::PageIndex;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, remove_file, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub const INDEX_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_pages: usize,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexFormat {
    Json,
    #[default]
    Bincode,
}

impl IndexFormat {
    fn other(self) -> Self {
        match self {
            IndexFormat::Json => IndexFormat::Bincode,
            IndexFormat::Bincode => IndexFormat::Json,
        }
    }
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self, format: IndexFormat) -> PathBuf {
        match format {
            IndexFormat::Json => self.root.join("index.json"),
            IndexFormat::Bincode => self.root.join("index.bin"),
        }
    }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

/// Destination for a finished index.
pub trait IndexSink {
    fn write_index(&mut self, index: &PageIndex) -> Result<()>;
}

/// Writes the index into an index directory.
pub struct DirSink {
    pub paths: IndexPaths,
    pub format: IndexFormat,
}

impl IndexSink for DirSink {
    fn write_index(&mut self, index: &PageIndex) -> Result<()> {
        save_index(&self.paths, index, self.format)
    }
}

/// Serializes into any writer; key order and page order are preserved.
pub fn write_index<W: Write>(w: W, index: &PageIndex, format: IndexFormat) -> Result<()> {
    match format {
        IndexFormat::Json => serde_json::to_writer_pretty(w, index)?,
        IndexFormat::Bincode => bincode::serialize_into(w, index)?,
    }
    Ok(())
}

pub fn read_index<R: Read>(r: R, format: IndexFormat) -> Result<PageIndex> {
    let index = match format {
        IndexFormat::Json => serde_json::from_reader(r)?,
        IndexFormat::Bincode => bincode::deserialize_from(r)?,
    };
    Ok(index)
}

pub fn save_index(paths: &IndexPaths, index: &PageIndex, format: IndexFormat) -> Result<()> {
    create_dir_all(&paths.root)?;
    let path = paths.index(format);
    let f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    write_index(&mut w, index, format)?;
    w.flush()?;

    // A leftover file in the other format would shadow this one on load.
    let stale = paths.index(format.other());
    if stale.exists() {
        remove_file(&stale).with_context(|| format!("removing stale {}", stale.display()))?;
    }
    tracing::debug!(path = %path.display(), terms = index.len(), "saved index");
    Ok(())
}

pub fn load_index(paths: &IndexPaths, format: IndexFormat) -> Result<PageIndex> {
    let path = paths.index(format);
    let f = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let index = read_index(BufReader::new(f), format)
        .with_context(|| format!("decoding {}", path.display()))?;
    tracing::debug!(path = %path.display(), terms = index.len(), "loaded index");
    Ok(index)
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())
        .with_context(|| format!("opening {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Load `meta.json` if present and reject indexes written by an incompatible
/// version. A directory without metadata is accepted as is.
pub fn check_meta(paths: &IndexPaths) -> Result<Option<MetaFile>> {
    if !paths.meta().exists() {
        return Ok(None);
    }
    let meta = load_meta(paths)?;
    if meta.version != INDEX_VERSION {
        bail!(
            "index at {} has version {}, expected {}",
            paths.root.display(),
            meta.version,
            INDEX_VERSION
        );
    }
    Ok(Some(meta))
}

/// Detect the stored format: bincode if `index.bin` exists, otherwise JSON.
pub fn detect_format(paths: &IndexPaths) -> IndexFormat {
    if paths.index(IndexFormat::Bincode).exists() {
        IndexFormat::Bincode
    } else {
        IndexFormat::Json
    }
}
