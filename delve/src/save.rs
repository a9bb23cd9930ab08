//! Save and load a whole [`World`].
//!
//! A save is `zlib(bincode(version, world))`. The world holds no pointers,
//! only ids, so it encodes as a plain value tree; ids are checked again on
//! load.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use log::{info, warn};
use thiserror::Error;

use crate::world::{LinkError, World};

/// Bump when the encoded layout of [`World`] changes.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("encoding error: {0}")]
    Encode(#[from] bincode::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("save is inconsistent: {0}")]
    Links(#[from] LinkError),
}

/// Encode `world` into a compressed blob.
pub fn save(world: &World) -> Result<Vec<u8>, SaveError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    bincode::serialize_into(&mut encoder, &SAVE_VERSION)?;
    bincode::serialize_into(&mut encoder, world)?;
    Ok(encoder.finish()?)
}

/// Decode a blob produced by [`save`].
pub fn load(bytes: &[u8]) -> Result<World, SaveError> {
    let mut decoder = ZlibDecoder::new(bytes);
    let found: u32 = bincode::deserialize_from(&mut decoder)?;
    if found != SAVE_VERSION {
        warn!("rejecting save: version {found}, expected {SAVE_VERSION}");
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found,
        });
    }
    let world: World = bincode::deserialize_from(&mut decoder)?;
    if let Err(e) = world.check_links() {
        warn!("rejecting save: {e}");
        return Err(e.into());
    }
    Ok(world)
}

/// Save to `path`. The file is replaced only once the new save is fully
/// written, so a failure leaves any previous save intact.
pub fn save_to_path(world: &World, path: &Path) -> Result<(), SaveError> {
    let bytes = save(world)?;
    write_atomic(path, &bytes)?;
    info!(
        "saved turn {} on floor {} to {} ({} bytes)",
        world.turn,
        world.current_floor,
        path.display(),
        bytes.len()
    );
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<World, SaveError> {
    let bytes = fs::read(path)?;
    let world = load(&bytes)?;
    info!(
        "loaded turn {} on floor {} from {}",
        world.turn,
        world.current_floor,
        path.display()
    );
    Ok(world)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = temp_path_for(path);
    if let Err(e) = write_synced(&tmp, bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut f = fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("savegame");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}
