use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use encoding_rs::{EncoderResult, Encoding};

use crate::error::ProcessError;

/// Replaces characters the output encoding can't represent
const UNMAPPABLE_REPLACEMENT: u8 = b'?';

/// How the output file of a rule set looks.
#[derive(Debug, Clone, Copy)]
pub struct OutputFormat {
    pub delimiter: u8,
    pub header: &'static [&'static str],
    pub encoding: &'static Encoding,
    pub file_name_suffix: &'static str,
}

/// Creates (or truncates) `path` and writes the header and then `rows` in order.
/// Rows don't need to have as many fields as the header.
pub fn write_table(
    path: &Path,
    format: &OutputFormat,
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<(), ProcessError> {
    log::info!("Writing {}...", path.display());
    let content = render_table(format, rows)?;
    let content = encode(&content, format.encoding);

    let file = File::create(path).map_err(|err| ProcessError::io(path, err))?;
    let mut file = BufWriter::new(file);
    file.write_all(&content)
        .and_then(|()| file.flush())
        .map_err(|err| ProcessError::io(path, err))?;
    log::info!("Writing {}...done", path.display());
    Ok(())
}

fn render_table(
    format: &OutputFormat,
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<String, ProcessError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter)
        .flexible(true)
        .from_writer(vec![]);
    writer.write_record(format.header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let content = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    // Only ever fed with &str fields
    Ok(String::from_utf8_lossy(&content).into_owned())
}

fn encode(content: &str, encoding: &'static Encoding) -> Vec<u8> {
    if encoding == encoding_rs::UTF_8 {
        return content.as_bytes().to_vec();
    }
    let mut encoder = encoding.new_encoder();
    let mut encoded = Vec::with_capacity(content.len());
    let mut unmappable = 0;
    let mut buffer = [0; 1024];
    let mut remaining = content;
    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(remaining, &mut buffer, true);
        encoded.extend_from_slice(&buffer[..written]);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {}
            EncoderResult::Unmappable(_) => {
                encoded.push(UNMAPPABLE_REPLACEMENT);
                unmappable += 1;
            }
        }
    }
    if unmappable > 0 {
        log::warn!(
            "Replaced {unmappable} characters that can't be represented in {}",
            encoding.name()
        );
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTF8_FORMAT: OutputFormat = OutputFormat {
        delimiter: b';',
        header: &["A", "B"],
        encoding: encoding_rs::UTF_8,
        file_name_suffix: "test",
    };

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|field| field.to_string()).collect()
    }

    #[test]
    fn writes_header_and_rows() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.csv");
        write_table(&path, &UTF8_FORMAT, vec![row(&["1", "2"]), row(&["3", "4"])]).unwrap();
        assert_eq!("A;B\r\n1;2\r\n3;4\r\n", std::fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn quotes_only_when_needed() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.csv");
        write_table(&path, &UTF8_FORMAT, vec![row(&["a;b", "say \"hi\""]), row(&["1,5", "x"])]).unwrap();
        assert_eq!(
            "A;B\r\n\"a;b\";\"say \"\"hi\"\"\"\r\n1,5;x\r\n",
            std::fs::read_to_string(&path).unwrap()
        );
    }

    #[test]
    fn rows_may_differ_in_length_from_header() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.csv");
        write_table(&path, &UTF8_FORMAT, vec![row(&["1", "2", "3"])]).unwrap();
        assert_eq!("A;B\r\n1;2;3\r\n", std::fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn truncates_existing_file() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.csv");
        std::fs::write(&path, "old content that is much longer than the new one").unwrap();
        write_table(&path, &UTF8_FORMAT, vec![]).unwrap();
        assert_eq!("A;B\r\n", std::fs::read_to_string(&path).unwrap());
    }

    #[test]
    fn writes_windows_1252() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.csv");
        let format = OutputFormat {
            header: &["Débito", "Cód."],
            encoding: encoding_rs::WINDOWS_1252,
            ..UTF8_FORMAT
        };
        write_table(&path, &format, vec![row(&["Año", "€"])]).unwrap();
        assert_eq!(
            b"D\xE9bito;C\xF3d.\r\nA\xF1o;\x80\r\n".to_vec(),
            std::fs::read(&path).unwrap()
        );
    }

    #[test]
    fn replaces_unmappable_characters() {
        assert_eq!(b"a?b".to_vec(), encode("a\u{4E2D}b", encoding_rs::WINDOWS_1252));
    }

    #[test]
    fn mixes_mapped_and_unmappable_characters() {
        assert_eq!(
            b"\xD1and\xFA ? \x80 ??;Cr\xE9dito".to_vec(),
            encode("Ñandú 中 € 🙂文;Crédito", encoding_rs::WINDOWS_1252)
        );
    }

    #[test]
    fn encodes_content_longer_than_one_buffer() {
        let content = "Débito;中\r\n".repeat(500);
        let encoded = encode(&content, encoding_rs::WINDOWS_1252);
        assert_eq!(b"D\xE9bito;?\r\n".repeat(500), encoded);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("missing").join("out.csv");
        let err = write_table(&path, &UTF8_FORMAT, vec![]).unwrap_err();
        assert_eq!(crate::error::ErrorKind::Io, err.kind());
    }
}
