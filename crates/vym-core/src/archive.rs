//! EPUB archive access.
//!
//! Opens the container once and hands out markup documents lazily, one per
//! `next()`. The archive handle lives inside the iterator, so it is released as
//! soon as the caller drops it, whether the run finished or bailed out early.

use crate::config::DocumentOrder;
use crate::error::ExtractError;
use epub::doc::EpubDoc;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::ZipArchive;

const EPUB_MIMETYPE: &[u8] = b"application/epub+zip";

/// One markup file from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationDocument {
    /// Archive-relative path, e.g. `OEBPS/202501.xhtml`.
    pub path: String,
    pub content: Vec<u8>,
}

/// Open `path` and return its markup documents in the requested order.
pub fn open_documents(path: &Path, order: DocumentOrder) -> Result<Documents, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    info!(path = %path.display(), %order, "Opening EPUB");

    match order {
        DocumentOrder::Archive => ArchiveDocuments::open(path).map(Documents::Archive),
        DocumentOrder::Spine => SpineDocuments::open(path).map(Documents::Spine),
    }
}

/// Lazy sequence of documents; see [`open_documents`].
pub enum Documents {
    Archive(ArchiveDocuments),
    Spine(SpineDocuments),
}

impl Iterator for Documents {
    type Item = Result<PublicationDocument, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Documents::Archive(inner) => inner.next(),
            Documents::Spine(inner) => inner.next(),
        }
    }
}

/// Documents in zip central-directory order.
pub struct ArchiveDocuments {
    archive: ZipArchive<BufReader<File>>,
    next_index: usize,
}

impl ArchiveDocuments {
    fn open(path: &Path) -> Result<Self, ExtractError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ExtractError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ExtractError::NotAnArchive {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        })?;
        let mut archive =
            ZipArchive::new(BufReader::new(file)).map_err(|err| ExtractError::NotAnArchive {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        if !has_epub_mimetype(&mut archive) {
            warn!(
                path = %path.display(),
                "Archive has no EPUB mimetype entry; scanning it anyway"
            );
        }
        debug!(entries = archive.len(), "Opened zip archive");

        Ok(Self {
            archive,
            next_index: 0,
        })
    }
}

impl Iterator for ArchiveDocuments {
    type Item = Result<PublicationDocument, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index < self.archive.len() {
            let index = self.next_index;
            self.next_index += 1;

            let mut entry = match self.archive.by_index(index) {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(Err(ExtractError::MalformedMarkup {
                        document: format!("entry #{index}"),
                        reason: err.to_string(),
                    }));
                }
            };
            if entry.is_dir() || !is_markup_name(entry.name()) {
                continue;
            }

            let path = entry.name().to_string();
            let mut content = Vec::with_capacity(entry.size() as usize);
            if let Err(err) = entry.read_to_end(&mut content) {
                return Some(Err(ExtractError::MalformedMarkup {
                    document: path,
                    reason: err.to_string(),
                }));
            }
            debug!(document = %path, bytes = content.len(), "Read archive entry");
            return Some(Ok(PublicationDocument { path, content }));
        }
        None
    }
}

/// Documents in package spine (reading) order.
pub struct SpineDocuments {
    doc: EpubDoc<BufReader<File>>,
    started: bool,
}

impl SpineDocuments {
    fn open(path: &Path) -> Result<Self, ExtractError> {
        let doc = EpubDoc::new(path).map_err(|err| ExtractError::NotAnArchive {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        debug!(spine_items = doc.get_num_chapters(), "Opened EPUB package");
        Ok(Self {
            doc,
            started: false,
        })
    }
}

impl Iterator for SpineDocuments {
    type Item = Result<PublicationDocument, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.doc.get_num_chapters() == 0 {
                return None;
            }
            if self.started {
                if !self.doc.go_next() {
                    return None;
                }
            } else {
                self.started = true;
            }

            let chapter = self.doc.get_current_chapter();
            let path = self
                .doc
                .get_current_path()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_else(|| format!("spine #{chapter}"));

            match self.doc.get_current() {
                Some((content, mime)) => {
                    if !mime.contains("html") && !is_markup_name(&path) {
                        debug!(document = %path, %mime, "Skipping non-markup spine item");
                        continue;
                    }
                    debug!(document = %path, bytes = content.len(), "Read spine item");
                    return Some(Ok(PublicationDocument { path, content }));
                }
                None => {
                    return Some(Err(ExtractError::MalformedMarkup {
                        document: path,
                        reason: "spine item could not be read from the archive".to_string(),
                    }));
                }
            }
        }
    }
}

fn has_epub_mimetype(archive: &mut ZipArchive<BufReader<File>>) -> bool {
    let Ok(mut entry) = archive.by_name("mimetype") else {
        return false;
    };
    let mut data = Vec::new();
    entry.read_to_end(&mut data).is_ok() && data.trim_ascii() == EPUB_MIMETYPE
}

fn is_markup_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xhtml") || lower.ends_with(".html") || lower.ends_with(".htm")
}
