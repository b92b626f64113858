//! Extraction instruction sets loaded from a directory of Markdown files.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of instruction set files.
const INSTRUCTION_EXTENSION: &str = "md";

/// Source of named extraction instructions.
pub trait InstructionSource {
    /// Names of the available instruction sets, sorted.
    fn names(&self) -> Vec<&str>;

    /// Instruction text for `name`.
    ///
    /// Fails with [`Error::InstructionSetNotFound`] for unknown names.
    fn get(&self, name: &str) -> Result<&str>;
}

/// Instruction sets read from `<dir>/*.md`, named by file stem.
#[derive(Debug, Clone, Default)]
pub struct InstructionLibrary {
    dir: Option<PathBuf>,
    sets: BTreeMap<String, String>,
}

impl InstructionLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `.md` file in `dir`.
    ///
    /// A missing directory is an error; an empty one yields an empty library.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut sets = BTreeMap::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_instruction = path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(INSTRUCTION_EXTENSION));
            if !is_instruction {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping instruction file with non UTF-8 name: {}", path.display());
                continue;
            };
            sets.insert(name.to_string(), fs::read_to_string(&path)?);
        }

        log::debug!("Loaded {} instruction sets from {}", sets.len(), dir.display());
        Ok(Self {
            dir: Some(dir.to_path_buf()),
            sets,
        })
    }

    /// Add an instruction set in memory.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.sets.insert(name.into(), text.into());
    }

    /// Directory the library was loaded from, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Number of instruction sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl InstructionSource for InstructionLibrary {
    fn names(&self) -> Vec<&str> {
        self.sets.keys().map(String::as_str).collect()
    }

    fn get(&self, name: &str) -> Result<&str> {
        self.sets
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::InstructionSetNotFound(name.to_string()))
    }
}
