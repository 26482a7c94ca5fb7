use crate::error::{AuditError, Result};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Gzip,
    Plain,
}

/// Open a text file, decompressing it when it starts with the gzip magic
/// bytes. Anything else is read as plain text, so a corrupt gzip stream
/// fails on read instead of being mistaken for plain CSV.
pub fn open_text(path: &Path) -> Result<(Compression, Box<dyn Read>)> {
    if !path.exists() {
        return Err(AuditError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
    let compression = sniff(reader.fill_buf()?);
    debug!(path = %path.display(), ?compression, "opened input");

    let source: Box<dyn Read> = match compression {
        Compression::Gzip => Box::new(MultiGzDecoder::new(reader)),
        Compression::Plain => Box::new(reader),
    };
    Ok((compression, source))
}

fn sniff(head: &[u8]) -> Compression {
    if head.starts_with(&GZIP_MAGIC) {
        Compression::Gzip
    } else {
        Compression::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plain_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, "a,b\n1,2\n")?;

        let (compression, mut source) = open_text(temp_file.path())?;
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        assert_eq!(compression, Compression::Plain);
        assert_eq!(text, "a,b\n1,2\n");
        Ok(())
    }

    #[test]
    fn test_gzip_file() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let mut encoder = GzEncoder::new(temp_file.reopen()?, flate2::Compression::default());
        encoder.write_all(b"a,b\n1,2\n")?;
        encoder.finish()?;

        let (compression, mut source) = open_text(temp_file.path())?;
        let mut text = String::new();
        source.read_to_string(&mut text)?;

        assert_eq!(compression, Compression::Gzip);
        assert_eq!(text, "a,b\n1,2\n");
        Ok(())
    }

    #[test]
    fn test_truncated_gzip_fails_on_read() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(&[0x1f, 0x8b, 0x08, 0x00, 0x01])?;

        let (compression, mut source) = open_text(temp_file.path())?;
        let mut text = String::new();

        assert_eq!(compression, Compression::Gzip);
        assert!(source.read_to_string(&mut text).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_file_is_plain() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let (compression, _) = open_text(temp_file.path())?;
        assert_eq!(compression, Compression::Plain);
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let err = open_text(Path::new("does/not/exist.csv.gz")).err().unwrap();
        assert!(matches!(err, AuditError::MissingFile { .. }));
    }
}
