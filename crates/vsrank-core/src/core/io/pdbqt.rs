use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::trace;

const ATOM_RECORD: &[u8] = b"ATOM";
const END_OF_MODEL: &[u8] = b"ENDMDL";
const HYDROGEN_NAME: &[u8] = b"H";

/// Counts the non-hydrogen `ATOM` records of the first model in a pdbqt stream.
///
/// Counting stops at the first `ENDMDL`; a file without one is counted to the end. The count
/// saturates at `u8::MAX`. Lines are matched as raw bytes, so remarks in a legacy encoding
/// do not stop the count.
pub fn count_heavy_atoms(reader: impl BufRead) -> io::Result<u8> {
    let mut count: u8 = 0;
    for line in reader.split(b'\n') {
        let line = line?;
        if line.starts_with(END_OF_MODEL) {
            break;
        }
        if !line.starts_with(ATOM_RECORD) {
            continue;
        }
        // Third whitespace-separated column is the atom name.
        let mut fields = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|field| !field.is_empty());
        match fields.nth(2) {
            Some(name) if name != HYDROGEN_NAME => count = count.saturating_add(1),
            _ => {}
        }
    }
    Ok(count)
}

/// Heavy-atom count of the pose stored at `path`, or 0 if the file cannot be opened or read.
pub fn count_heavy_atoms_in(path: &Path) -> u8 {
    let counted = File::open(path).and_then(|file| count_heavy_atoms(BufReader::new(file)));
    match counted {
        Ok(count) => count,
        Err(e) => {
            trace!(path = %path.display(), error = %e, "Structure file unavailable.");
            0
        }
    }
}
