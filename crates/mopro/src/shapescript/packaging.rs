//! Archive packaging of rendering scripts.
//!
//! The host tool stores a script as a single-entry zip archive whose entry,
//! `str.dat`, holds the script text as UTF-16LE without a byte order mark.
//! The archive is embedded in the document as base64.

use std::io::{Cursor, Write};

use base64::{Engine, engine::general_purpose::STANDARD};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::MoproError;

/// Name of the archive entry holding the script.
pub const SCRIPT_ENTRY_NAME: &str = "str.dat";

/// Zip `script` into a one-entry archive and return it as base64.
pub fn encode_script(script: &str) -> Result<String, MoproError> {
    let archive = zip_script(script).map_err(|err| MoproError::Packaging(err.to_string()))?;
    Ok(STANDARD.encode(archive))
}

fn zip_script(script: &str) -> zip::result::ZipResult<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file(SCRIPT_ENTRY_NAME, options)?;
    writer.write_all(&utf16_le(script))?;
    Ok(writer.finish()?.into_inner())
}

fn utf16_le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;

    fn decode(encoded: &str) -> ZipArchive<Cursor<Vec<u8>>> {
        let bytes = STANDARD.decode(encoded).unwrap();
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_utf16_le_without_bom() {
        assert_eq!(utf16_le("ab"), vec![b'a', 0, b'b', 0]);
        assert_eq!(utf16_le(""), Vec::<u8>::new());
    }

    #[test]
    fn test_archive_has_single_script_entry() {
        let script = "shape main{drawnativeshape();}";
        let mut archive = decode(&encode_script(script).unwrap());
        assert_eq!(archive.len(), 1);

        let mut entry = archive.by_name(SCRIPT_ENTRY_NAME).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, utf16_le(script));
    }

    #[test]
    fn test_non_ascii_script_survives() {
        let script = "shape main{println(\"Größe\");}";
        let mut archive = decode(&encode_script(script).unwrap());
        let mut entry = archive.by_index(0).unwrap();
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).unwrap();
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        assert_eq!(String::from_utf16(&units).unwrap(), script);
    }
}
