//! Fixture helpers for building small EPUB archives on disk.

use calamine::{Reader, Xlsx, open_workbook};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub(crate) fn unique_temp_path(prefix: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("vym_core_{prefix}_{now}"))
}

/// All cells of a worksheet as display strings; empty cells become "".
pub(crate) fn read_rows(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("workbook should open");
    let range = workbook
        .worksheet_range(sheet)
        .expect("sheet should exist");
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// Wraps body markup in an XHTML shell.
pub(crate) fn xhtml(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>t</title></head>\
         <body>{body}</body></html>"
    )
}

/// In-memory EPUB description; `spine` lists manifest ids in reading order.
pub(crate) struct EpubFixture {
    documents: Vec<(String, Vec<u8>)>,
    resources: Vec<(String, Vec<u8>)>,
    spine: Option<Vec<usize>>,
}

impl EpubFixture {
    pub(crate) fn new() -> Self {
        Self {
            documents: Vec::new(),
            resources: Vec::new(),
            spine: None,
        }
    }

    pub(crate) fn document(mut self, name: &str, markup: impl Into<Vec<u8>>) -> Self {
        self.documents.push((name.to_string(), markup.into()));
        self
    }

    pub(crate) fn resource(mut self, name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.resources.push((name.to_string(), data.into()));
        self
    }

    /// Reading order as indices into the documents added so far.
    pub(crate) fn spine_order(mut self, order: &[usize]) -> Self {
        self.spine = Some(order.to_vec());
        self
    }

    pub(crate) fn write_to(&self, path: &Path) -> PathBuf {
        let file = std::fs::File::create(path).expect("fixture file should be created");
        let mut zip = ZipWriter::new(file);
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("mimetype", stored).expect("mimetype entry");
        zip.write_all(b"application/epub+zip").expect("mimetype body");

        zip.start_file("META-INF/container.xml", deflated)
            .expect("container entry");
        zip.write_all(CONTAINER_XML.as_bytes())
            .expect("container body");

        zip.start_file("OEBPS/content.opf", deflated)
            .expect("opf entry");
        zip.write_all(self.package_document().as_bytes())
            .expect("opf body");

        for (name, data) in &self.resources {
            zip.start_file(name.as_str(), deflated)
                .expect("resource entry");
            zip.write_all(data).expect("resource body");
        }
        for (name, data) in &self.documents {
            zip.start_file(name.as_str(), deflated)
                .expect("document entry");
            zip.write_all(data).expect("document body");
        }
        zip.finish().expect("fixture archive should finish");
        path.to_path_buf()
    }

    pub(crate) fn write_temp(&self, prefix: &str) -> PathBuf {
        let path = unique_temp_path(prefix).with_extension("epub");
        self.write_to(&path)
    }

    fn package_document(&self) -> String {
        let manifest: String = self
            .documents
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| {
                let href = name.strip_prefix("OEBPS/").unwrap_or(name);
                format!(
                    "<item id=\"doc{idx}\" href=\"{href}\" media-type=\"application/xhtml+xml\"/>"
                )
            })
            .collect();
        let order: Vec<usize> = self
            .spine
            .clone()
            .unwrap_or_else(|| (0..self.documents.len()).collect());
        let spine: String = order
            .iter()
            .map(|idx| format!("<itemref idref=\"doc{idx}\"/>"))
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\" unique-identifier=\"uid\">\
             <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\
             <dc:identifier id=\"uid\">urn:uuid:fixture</dc:identifier>\
             <dc:title>Fixture</dc:title><dc:language>es</dc:language>\
             </metadata><manifest>{manifest}</manifest><spine>{spine}</spine></package>"
        )
    }
}

const CONTAINER_XML: &str = "<?xml version=\"1.0\"?>\n\
<container version=\"1.0\" xmlns=\"urn:oasis:names:tc:opendocument:xmlns:container\">\
<rootfiles><rootfile full-path=\"OEBPS/content.opf\" media-type=\"application/oebps-package+xml\"/></rootfiles>\
</container>";
