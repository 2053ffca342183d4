//! File I/O for saving and loading accepted foldings.
//!
//! Binary format for `foldings.bin` (little endian):
//! - u32: folding count
//! - repeat per folding:
//!   - u32: cube count
//!   - repeat per cube: 3 x i32 (x, y, z)

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::geometry::Position;
use crate::grid::{format_folding, format_layers};
use crate::Folding;

pub const FOLDINGS_BIN: &str = "foldings.bin";
pub const FOLDINGS_TXT: &str = "foldings.txt";

/// Upper bound on preallocation driven by counts read from a file.
const MAX_PREALLOCATION: usize = 1024;

/// Saves foldings to both binary and text files in `dir`.
pub fn save(dir: &Path, foldings: &[Folding]) -> std::io::Result<()> {
    save_text(dir, foldings)?;
    save_binary(dir, foldings)?;
    log::info!("wrote {} foldings to {}", foldings.len(), dir.display());
    Ok(())
}

/// Saves foldings in human-readable text format.
fn save_text(dir: &Path, foldings: &[Folding]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(dir.join(FOLDINGS_TXT))?);
    writeln!(file, "Found {} foldings:\n", foldings.len())?;
    for (i, folding) in foldings.iter().enumerate() {
        writeln!(file, "Folding {}:", i + 1)?;
        write!(file, "{}", format_folding(folding))?;
        write!(file, "{}", format_layers(folding))?;
        writeln!(file)?;
    }
    file.flush()
}

/// Saves foldings in compact binary format for fast loading.
fn save_binary(dir: &Path, foldings: &[Folding]) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(dir.join(FOLDINGS_BIN))?);

    file.write_all(&(foldings.len() as u32).to_le_bytes())?;

    for folding in foldings {
        file.write_all(&(folding.len() as u32).to_le_bytes())?;
        for position in folding {
            for coord in position.coords() {
                file.write_all(&coord.to_le_bytes())?;
            }
        }
    }

    file.flush()
}

fn read_u32(reader: &mut impl Read) -> Option<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer).ok()?;
    Some(u32::from_le_bytes(buffer))
}

fn read_i32(reader: &mut impl Read) -> Option<i32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer).ok()?;
    Some(i32::from_le_bytes(buffer))
}

/// Loads all foldings from the binary file in `dir`.
///
/// Returns `None` if the file is missing or truncated.
pub fn load_all(dir: &Path) -> Option<Vec<Folding>> {
    let mut file = BufReader::new(File::open(dir.join(FOLDINGS_BIN)).ok()?);

    let folding_count = read_u32(&mut file)? as usize;
    let mut foldings = Vec::with_capacity(folding_count.min(MAX_PREALLOCATION));

    for _ in 0..folding_count {
        let cube_count = read_u32(&mut file)? as usize;
        let mut folding = Vec::with_capacity(cube_count.min(MAX_PREALLOCATION));
        for _ in 0..cube_count {
            let x = read_i32(&mut file)?;
            let y = read_i32(&mut file)?;
            let z = read_i32(&mut file)?;
            folding.push(Position::new(x, y, z));
        }
        foldings.push(folding);
    }

    Some(foldings)
}

/// Returns the number of saved foldings without loading them all.
pub fn count(dir: &Path) -> Option<usize> {
    let mut file = File::open(dir.join(FOLDINGS_BIN)).ok()?;
    read_u32(&mut file).map(|count| count as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainSpec;
    use crate::solver::{solve_all, SearchConfig};

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("snake-cube-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_save_and_load() {
        let dir = scratch_dir("save-load");
        let foldings = solve_all(&ChainSpec::standard(), SearchConfig::default()).unwrap();

        save(&dir, &foldings).unwrap();
        assert_eq!(count(&dir), Some(foldings.len()));
        assert_eq!(load_all(&dir), Some(foldings));

        let text = std::fs::read_to_string(dir.join(FOLDINGS_TXT)).unwrap();
        assert!(text.starts_with("Found 8 foldings:\n\nFolding 1:\n(0, 0, 0)\n(1, 0, 0)\n"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_negative_coordinates_survive() {
        let dir = scratch_dir("negative");
        let foldings = vec![vec![Position::new(0, 0, 0), Position::new(0, -1, 0)]];
        save(&dir, &foldings).unwrap();
        assert_eq!(load_all(&dir), Some(foldings));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_corrupt_header_is_rejected() {
        let dir = scratch_dir("corrupt");
        let mut bytes = u32::MAX.to_le_bytes().to_vec();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&7i32.to_le_bytes());
        std::fs::write(dir.join(FOLDINGS_BIN), bytes).unwrap();

        assert_eq!(count(&dir), Some(u32::MAX as usize));
        assert_eq!(load_all(&dir), None);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let dir = scratch_dir("missing");
        assert_eq!(count(&dir), None);
        assert_eq!(load_all(&dir), None);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
