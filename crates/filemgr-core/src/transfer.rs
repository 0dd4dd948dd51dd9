//! Streaming file transfers: copy, hash, brotli compress and decompress.
//!
//! Every transfer opens its source before creating the destination, so a
//! missing source never leaves an empty file behind. Destinations are
//! buffered and flushed before returning; both handles are dropped on every
//! exit path.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::{BROTLI_BUFFER_SIZE, BROTLI_LG_WINDOW, BROTLI_QUALITY};
use crate::error::CommandError;

type Result<T> = std::result::Result<T, CommandError>;

fn open_source(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(CommandError::io("open", path))
}

fn create_destination(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(CommandError::io("create", path))
}

fn finish(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(CommandError::io("flush", path))
}

/// Refuse transfers whose destination would truncate the source.
fn ensure_distinct(src: &Path, dst: &Path) -> Result<()> {
    if src == dst {
        return Err(CommandError::SameFile(dst.to_path_buf()));
    }
    Ok(())
}

/// Write the raw contents of `src` to `out`.
pub fn stream_file<W: Write + ?Sized>(src: &Path, out: &mut W) -> Result<u64> {
    let mut reader = open_source(src)?;
    io::copy(&mut reader, out).map_err(CommandError::io("read", src))
}

/// Copy `src` into a new (or truncated) file at `dst`.
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    ensure_distinct(src, dst)?;
    let mut reader = open_source(src)?;
    let mut writer = create_destination(dst)?;
    let copied = io::copy(&mut reader, &mut writer).map_err(CommandError::io("copy", src))?;
    finish(writer, dst)?;
    Ok(copied)
}

/// SHA-256 of the contents of `src`, as lowercase hex.
pub fn hash_file(src: &Path) -> Result<String> {
    let mut reader = open_source(src)?;
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(CommandError::io("hash", src))?;
    Ok(hex::encode(hasher.finalize()))
}

/// Brotli-compress `src` into `dst`, returning the compressed size.
pub fn compress_file(src: &Path, dst: &Path) -> Result<u64> {
    ensure_distinct(src, dst)?;
    let reader = open_source(src)?;
    let mut writer = create_destination(dst)?;

    let params = brotli::enc::BrotliEncoderParams {
        quality: BROTLI_QUALITY as i32,
        lgwin: BROTLI_LG_WINDOW as i32,
        ..Default::default()
    };
    let mut encoder = brotli::CompressorReader::with_params(reader, BROTLI_BUFFER_SIZE, &params);
    let written =
        io::copy(&mut encoder, &mut writer).map_err(CommandError::io("compress", src))?;

    finish(writer, dst)?;
    Ok(written)
}

/// Decompress the brotli stream in `src` into `dst`.
///
/// Malformed input fails with an I/O error; whatever was decoded before the
/// failure stays in `dst`.
pub fn decompress_file(src: &Path, dst: &Path) -> Result<()> {
    ensure_distinct(src, dst)?;
    let reader = open_source(src)?;
    let mut writer = create_destination(dst)?;

    let mut decoder = brotli::Decompressor::new(reader, BROTLI_BUFFER_SIZE);
    io::copy(&mut decoder, &mut writer).map_err(CommandError::io("decompress", src))?;

    finish(writer, dst)
}
