use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Content signature over file bytes only. Streams fixed-size chunks
/// through BLAKE3 so large files never have to fit in memory.
pub fn fingerprint_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)
        .with_context(|| format!("ハッシュ対象を開けませんでした: {}", path.display()))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = file
            .read(&mut buffer)
            .with_context(|| format!("ハッシュ対象を読めませんでした: {}", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
