//! Page selector: which page numbers a run crawls, and in what order

use crate::ConfigError;
use std::collections::HashSet;
use std::path::Path;

/// Which page numbers a run crawls
///
/// A contiguous range is processed in ascending order; an explicit list is
/// processed in its literal order. The two input modes are mutually
/// exclusive at the CLI, and a malformed selector is a configuration error
/// raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelector {
    /// Inclusive page range
    Range { start: u64, end: u64 },

    /// Explicit page numbers in literal order
    List(Vec<u64>),
}

impl PageSelector {
    /// Builds a selector from inclusive range bounds
    pub fn from_range(start: u64, end: u64) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::PageSelector(format!(
                "start page {} is greater than end page {}",
                start, end
            )));
        }
        Ok(Self::Range { start, end })
    }

    /// Builds a selector from a pages file, one page number per line
    ///
    /// Blank lines are ignored. A line that does not parse as an unsigned
    /// integer, a duplicate page number, or an empty file is a
    /// configuration error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut pages = Vec::new();
        let mut seen = HashSet::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let page: u64 = line.parse().map_err(|_| {
                ConfigError::PageSelector(format!(
                    "line {} of {} is not a page number: '{}'",
                    line_no + 1,
                    path.display(),
                    line
                ))
            })?;
            if !seen.insert(page) {
                return Err(ConfigError::PageSelector(format!(
                    "page {} appears more than once in {}",
                    page,
                    path.display()
                )));
            }
            pages.push(page);
        }

        if pages.is_empty() {
            return Err(ConfigError::PageSelector(format!(
                "{} contains no page numbers",
                path.display()
            )));
        }

        Ok(Self::List(pages))
    }

    /// Page numbers in processing order
    pub fn pages(&self) -> Vec<u64> {
        match self {
            Self::Range { start, end } => (*start..=*end).collect(),
            Self::List(pages) => pages.clone(),
        }
    }

    /// Number of pages this selector covers
    pub fn len(&self) -> usize {
        match self {
            Self::Range { start, end } => (end - start + 1) as usize,
            Self::List(pages) => pages.len(),
        }
    }

    /// Whether the selector covers no pages
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
