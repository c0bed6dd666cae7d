//! Theme manifest emission and the alias rewrite pass.
//!
//! The manifest is a small line-oriented text file Pidgin reads directly:
//! a fixed header, a `[default]` section marker, then one
//! `filename<TAB>glyphs` line per bundled image. Aliased flags (symlinks in
//! the flag directory) are folded onto their target's line as extra
//! tab-separated glyph sequences after the first pass.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// Manifest file name inside the theme directory.
pub const MANIFEST_NAME: &str = "theme";

/// Temporary name the manifest is moved to during the alias rewrite.
const MANIFEST_BACKUP_NAME: &str = "oldtheme";

const THEME_HOMEPAGE: &str = "https://github.com/radiocane/noto-emoji";
const THEME_NAME: &str = "Noto Emoji";
const THEME_DESCRIPTION: &str = "All Google/Android emojis";
const THEME_ICON: &str = "EU.png";
const THEME_AUTHOR: &str = "White_Rabbit";

/// Streaming writer for the theme manifest.
///
/// Creating the writer emits the fixed header and section marker; the file
/// handle is owned by the writer, so it is closed on every exit path.
pub struct ThemeWriter {
    file: BufWriter<File>,
    path: PathBuf,
}

impl ThemeWriter {
    /// Create the manifest inside `theme_dir` and write its header.
    pub fn create(theme_dir: &Path) -> Result<Self> {
        let path = theme_dir.join(MANIFEST_NAME);
        let file = File::create(&path).map_err(|e| ThemeError::Io {
            path: path.clone(),
            message: format!("failed to create manifest: {e}"),
        })?;

        let mut writer = Self {
            file: BufWriter::new(file),
            path,
        };
        writer.header()?;
        Ok(writer)
    }

    fn header(&mut self) -> Result<()> {
        write!(
            self.file,
            "# Encoding utf-8\n\
             # {THEME_HOMEPAGE}\n\
             Name={THEME_NAME}\n\
             Description={THEME_DESCRIPTION}\n\
             Icon={THEME_ICON}\n\
             Author={THEME_AUTHOR}\n\
             \n\
             [default]\n"
        )
        .map_err(|e| ThemeError::Io {
            path: self.path.clone(),
            message: format!("failed to write manifest header: {e}"),
        })
    }

    /// Append one `filename<TAB>glyphs` entry line.
    pub fn entry(&mut self, file_name: &str, glyphs: &str) -> Result<()> {
        writeln!(self.file, "{file_name}\t{glyphs}").map_err(|e| ThemeError::Io {
            path: self.path.clone(),
            message: format!("failed to write manifest entry: {e}"),
        })
    }

    /// Flush and close the manifest.
    pub fn finish(mut self) -> Result<()> {
        self.file.flush().map_err(|e| ThemeError::Io {
            path: self.path.clone(),
            message: format!("failed to flush manifest: {e}"),
        })
    }
}

/// Alias glyph sequences keyed by the glyph sequence they point at.
///
/// Both the targets and the aliases of one target keep insertion order.
#[derive(Debug, Default)]
pub struct LinkMap {
    entries: Vec<(String, Vec<String>)>,
}

impl LinkMap {
    /// Record `alias` as pointing at `target`.
    pub fn insert(&mut self, target: String, alias: String) {
        if let Some((_, aliases)) = self.entries.iter_mut().find(|(t, _)| *t == target) {
            aliases.push(alias);
        } else {
            self.entries.push((target, vec![alias]));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn aliases_for(&self, glyphs: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(target, _)| target == glyphs)
            .map(|(_, aliases)| aliases.as_slice())
    }
}

/// Rewrite the manifest, appending alias glyph sequences to the line whose
/// trailing tab-field matches a link target.
///
/// The manifest is renamed aside and streamed back line by line, so memory
/// stays bounded to a single line regardless of theme size. The renamed
/// copy is removed once the rewrite completes.
pub fn apply_aliases(theme_dir: &Path, links: &LinkMap) -> Result<()> {
    let manifest = theme_dir.join(MANIFEST_NAME);
    let backup = theme_dir.join(MANIFEST_BACKUP_NAME);

    fs::rename(&manifest, &backup).map_err(|e| ThemeError::Io {
        path: manifest.clone(),
        message: format!("failed to move manifest aside: {e}"),
    })?;

    let reader = BufReader::new(File::open(&backup).map_err(|e| ThemeError::Io {
        path: backup.clone(),
        message: format!("failed to reopen manifest: {e}"),
    })?);
    let mut writer = BufWriter::new(File::create(&manifest).map_err(|e| ThemeError::Io {
        path: manifest.clone(),
        message: format!("failed to recreate manifest: {e}"),
    })?);

    for line in reader.lines() {
        let line = line.map_err(|e| ThemeError::Io {
            path: backup.clone(),
            message: format!("failed to read manifest line: {e}"),
        })?;

        let glyphs = line.rsplit('\t').next().unwrap_or(line.as_str());
        let appended = match links.aliases_for(glyphs) {
            Some(aliases) => {
                let mut rewritten = line.clone();
                for alias in aliases {
                    rewritten.push('\t');
                    rewritten.push_str(alias);
                }
                rewritten
            }
            None => line,
        };

        writeln!(writer, "{appended}").map_err(|e| ThemeError::Io {
            path: manifest.clone(),
            message: format!("failed to write manifest line: {e}"),
        })?;
    }

    writer.flush().map_err(|e| ThemeError::Io {
        path: manifest.clone(),
        message: format!("failed to flush manifest: {e}"),
    })?;

    fs::remove_file(&backup).map_err(|e| ThemeError::Io {
        path: backup.clone(),
        message: format!("failed to remove old manifest: {e}"),
    })?;

    Ok(())
}
