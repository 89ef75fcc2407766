use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use edgekit_image::{Image, ImageSize};
use tempfile::NamedTempFile;

use crate::error::IoError;

/// The magic token of a binary greymap.
const MAGIC: &str = "P5";

/// The maximum value written in every header.
const MAX_VALUE: u8 = 255;

/// Read a binary greymap (PGM `P5`) with a single 8-bit channel.
///
/// # Arguments
///
/// * `file_path` - The path to the PGM file.
///
/// # Returns
///
/// A grayscale image with a single channel (mono8).
///
/// # Errors
///
/// * [`IoError::FileDoesNotExist`] if the file is missing.
/// * [`IoError::FileError`] if the file cannot be read.
/// * Any error of [`decode_image_pgm`].
pub fn read_image_pgm(file_path: impl AsRef<Path>) -> Result<Image<u8>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let bytes = fs::read(file_path)?;
    let image = decode_image_pgm(&bytes)?;

    log::debug!("read {} from {}", image.size(), file_path.display());

    Ok(image)
}

/// Cursor over the text lines of a PGM header.
struct HeaderLines<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderLines<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Next line without its terminating newline, `None` at the end of input.
    fn next_line(&mut self) -> Result<Option<&'a str>, IoError> {
        if self.pos >= self.bytes.len() {
            return Ok(None);
        }

        let rest = &self.bytes[self.pos..];
        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;

        std::str::from_utf8(line)
            .map(|line| Some(line.trim_end_matches('\r')))
            .map_err(|_| IoError::MalformedHeader("header is not valid text".to_string()))
    }

    /// Next line that is not a `#` comment.
    fn next_field(&mut self, field: &str) -> Result<&'a str, IoError> {
        while let Some(line) = self.next_line()? {
            if !line.trim_start().starts_with('#') {
                return Ok(line);
            }
        }
        Err(IoError::MalformedHeader(format!("missing {field} line")))
    }

    /// The bytes following the last consumed line.
    fn remainder(&self) -> &'a [u8] {
        &self.bytes[self.pos.min(self.bytes.len())..]
    }
}

fn parse_dimensions(line: &str) -> Result<ImageSize, IoError> {
    let malformed = || IoError::MalformedHeader(format!("invalid dimensions line: {line:?}"));

    let mut fields = line.split_whitespace();
    let (Some(width), Some(height), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed());
    };
    let width = width.parse::<i64>().map_err(|_| malformed())?;
    let height = height.parse::<i64>().map_err(|_| malformed())?;

    if width <= 0 || height <= 0 {
        return Err(IoError::InvalidDimensions(width, height));
    }

    let size = match (usize::try_from(width), usize::try_from(height)) {
        (Ok(width), Ok(height)) => ImageSize { width, height },
        _ => return Err(IoError::InvalidDimensions(width, height)),
    };
    if size.checked_area().is_none() {
        return Err(IoError::InvalidDimensions(width, height));
    }

    Ok(size)
}

fn parse_max_value(line: &str) -> Result<u8, IoError> {
    let value = line
        .trim()
        .parse::<u32>()
        .map_err(|_| IoError::MalformedHeader(format!("invalid max value line: {line:?}")))?;

    match u8::try_from(value) {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(IoError::MalformedHeader(format!(
            "max value must be within [1, 255], got {value}"
        ))),
    }
}

/// Decode a binary greymap from raw bytes.
///
/// The header is a `P5` magic line, a `width height` line and a max value line, each
/// optionally preceded by `#` comment lines. The header is followed by
/// `width * height` row-major pixel bytes; trailing bytes are ignored.
///
/// # Errors
///
/// * [`IoError::MalformedHeader`] if a header line is missing or unparsable.
/// * [`IoError::InvalidDimensions`] if the width or height is not positive or the pixel
///   count does not fit in memory addressing.
/// * [`IoError::TruncatedData`] if fewer pixel bytes than declared are present.
///
/// # Example
///
/// ```
/// use edgekit_io::pgm::decode_image_pgm;
///
/// let bytes = b"P5\n# made by hand\n3 1\n255\n\x00\x80\xff";
/// let image = decode_image_pgm(bytes).unwrap();
///
/// assert_eq!(image.width(), 3);
/// assert_eq!(image.as_slice(), &[0, 128, 255]);
/// ```
pub fn decode_image_pgm(bytes: &[u8]) -> Result<Image<u8>, IoError> {
    let mut lines = HeaderLines::new(bytes);

    let magic = lines
        .next_line()?
        .ok_or_else(|| IoError::MalformedHeader("empty file".to_string()))?;
    if magic.trim() != MAGIC {
        return Err(IoError::MalformedHeader(format!(
            "expected magic token {MAGIC}, got {magic:?}"
        )));
    }

    let size = parse_dimensions(lines.next_field("dimensions")?)?;
    parse_max_value(lines.next_field("max value")?)?;

    let data = lines.remainder();
    let expected = size.area();
    if data.len() < expected {
        return Err(IoError::TruncatedData(expected, data.len()));
    }

    Ok(Image::new(size, data[..expected].to_vec())?)
}

/// Encode an image as a binary greymap with the canonical three line header.
///
/// # Example
///
/// ```
/// use edgekit_image::Image;
/// use edgekit_io::pgm::encode_image_pgm;
///
/// let image = Image::from_rows(&[&[1u8, 2][..]]).unwrap();
///
/// assert_eq!(encode_image_pgm(&image), b"P5\n2 1\n255\n\x01\x02");
/// ```
pub fn encode_image_pgm(image: &Image<u8>) -> Vec<u8> {
    let header = format!(
        "{MAGIC}\n{} {}\n{MAX_VALUE}\n",
        image.width(),
        image.height()
    );

    let mut buf = Vec::with_capacity(header.len() + image.as_slice().len());
    buf.extend_from_slice(header.as_bytes());
    buf.extend_from_slice(image.as_slice());
    buf
}

/// Encode `image` into a temporary file next to `file_path`.
fn stage_image_pgm(file_path: &Path, image: &Image<u8>) -> Result<NamedTempFile, IoError> {
    let dir = match file_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&encode_image_pgm(image))?;
    staged.as_file().sync_all()?;

    Ok(staged)
}

/// Write an image as a binary greymap.
///
/// The data is written to a temporary file in the destination directory which is then
/// renamed over `file_path`, so a failed write never leaves a partial file behind.
///
/// # Arguments
///
/// * `file_path` - The path to the PGM file.
/// * `image` - The 8-bit grayscale image.
pub fn write_image_pgm(file_path: impl AsRef<Path>, image: &Image<u8>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    stage_image_pgm(file_path, image)?.persist(file_path)?;

    log::debug!("wrote {} to {}", image.size(), file_path.display());

    Ok(())
}

/// Write several images as binary greymaps, all or nothing.
///
/// Every image is first encoded into a temporary file; only when all of them have been
/// written are they renamed into place. If staging fails, the temporary files are
/// removed and no output exists. If a rename fails, the outputs already renamed are
/// removed again.
///
/// # Arguments
///
/// * `outputs` - The destination path and image of every file.
///
/// # Returns
///
/// The paths that were written, in order.
pub fn write_images_pgm<P: AsRef<Path>>(
    outputs: &[(P, &Image<u8>)],
) -> Result<Vec<PathBuf>, IoError> {
    let staged = outputs
        .iter()
        .map(|(path, image)| {
            let path: &Path = path.as_ref();
            Ok((path.to_path_buf(), stage_image_pgm(path, image)?))
        })
        .collect::<Result<Vec<_>, IoError>>()?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (path, file) in staged {
        if let Err(err) = file.persist(&path) {
            remove_written(&written);
            return Err(IoError::FileError(err.error));
        }
        log::debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Remove the outputs of a batch whose later renames failed.
fn remove_written(written: &[PathBuf]) {
    for path in written {
        if let Err(err) = fs::remove_file(path) {
            log::warn!("failed to remove partial output {}: {err}", path.display());
        }
    }
}
