use crate::crawler::OutputKind;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes crawled pages to the output directory
///
/// Pages crawled by number are written as `page-{n}.md` / `page-{n}.html`;
/// when no page number applies the file name is derived from the URL's
/// trailing numeric path segment (`article-{id}.*`).
#[derive(Debug, Clone)]
pub struct PageWriter {
    dir: PathBuf,
}

impl PageWriter {
    /// Creates a writer rooted at `dir`; the directory is created on demand
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Persists one page's content and returns the written path
    pub fn save_page(
        &self,
        content: &str,
        kind: OutputKind,
        page_number: Option<u64>,
        url: &str,
    ) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;

        let stem = match page_number {
            Some(n) => format!("page-{}", n),
            None => article_file_stem(url),
        };
        let path = self.dir.join(format!("{}.{}", stem, kind.extension()));

        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Derives a file stem from the URL's trailing numeric path segment
///
/// Falls back to `article` when the URL has no numeric segment (or does not
/// parse at all).
pub fn article_file_stem(url: &str) -> String {
    let id = Url::parse(url).ok().and_then(|parsed| {
        parsed.path_segments().and_then(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .rev()
                .find(|s| s.chars().all(|c| c.is_ascii_digit()))
                .map(|s| s.to_string())
        })
    });

    match id {
        Some(id) => format!("article-{}", id),
        None => "article".to_string(),
    }
}
