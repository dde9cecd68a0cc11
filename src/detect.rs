//! PDF header sniffing.
//!
//! The backend checks the header before handing a file to lopdf so that
//! an obviously wrong input (HTML, a text file, an empty file) fails with
//! a clear message instead of a parser error from deep inside lopdf.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Header information of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Read the first bytes of a file and sniff its PDF header.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut header = Vec::with_capacity(16);
    File::open(path)?.take(16).read_to_end(&mut header)?;
    sniff_bytes(&header)
}

/// Sniff a PDF header from the start of a byte buffer.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    let version = rest.get(..VERSION_LEN).ok_or(Error::UnknownFormat)?;

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => Ok(PdfHeader {
            version: String::from_utf8_lossy(version).into_owned(),
        }),
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_valid_headers() {
        assert_eq!(sniff_bytes(b"%PDF-1.7\n%\xe2\xe3").unwrap().version, "1.7");
        assert_eq!(sniff_bytes(b"%PDF-2.0\n").unwrap().version, "2.0");
    }

    #[test]
    fn test_sniff_not_a_pdf() {
        assert!(matches!(
            sniff_bytes(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(sniff_bytes(b""), Err(Error::UnknownFormat)));
        assert!(matches!(sniff_bytes(b"%PDF-1"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_bad_version() {
        assert!(matches!(
            sniff_bytes(b"%PDF-x.y\n"),
            Err(Error::UnsupportedVersion(v)) if v == "x.y"
        ));
    }

    #[test]
    fn test_sniff_path() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("a.pdf");
        std::fs::write(&pdf, b"%PDF-1.4\n%%EOF\n").unwrap();
        assert_eq!(sniff_path(&pdf).unwrap().to_string(), "PDF 1.4");

        let txt = dir.path().join("a.txt");
        std::fs::write(&txt, b"hi").unwrap();
        assert!(matches!(sniff_path(&txt), Err(Error::UnknownFormat)));
    }
}
