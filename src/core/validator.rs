use image::{DynamicImage, ImageReader, ImageResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of filtering candidate paths down to decodable images
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Paths that decoded successfully, in input order
    pub valid: Vec<PathBuf>,
    /// Rejected paths with the reason they were skipped
    pub rejected: Vec<(PathBuf, String)>,
}

/// Keep only the paths that can be opened and decoded as images.
///
/// Rejected paths are logged and never cause an error; an empty `valid`
/// list is left to the caller to handle.
pub fn filter_valid_images<P: AsRef<Path>>(candidates: &[P]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for candidate in candidates {
        let path = candidate.as_ref();
        match check_image(path) {
            Ok((width, height)) => {
                debug!("Valid image {:?} ({}x{})", path, width, height);
                report.valid.push(path.to_path_buf());
            }
            Err(reason) => {
                warn!("Skipping invalid or corrupt image file: {:?} ({})", path, reason);
                report.rejected.push((path.to_path_buf(), reason));
            }
        }
    }

    info!(
        "Validated {} candidate(s): {} valid, {} skipped",
        candidates.len(),
        report.valid.len(),
        report.rejected.len()
    );
    report
}

/// Open and decode an image, picking the decoder from the file contents
/// rather than the extension. Used for both validation and display.
pub fn decode_image(path: &Path) -> ImageResult<DynamicImage> {
    ImageReader::open(path)?.with_guessed_format()?.decode()
}

fn check_image(path: &Path) -> Result<(u32, u32), String> {
    if !path.is_file() {
        return Err("not a regular file".to_string());
    }

    let img = decode_image(path).map_err(|e| e.to_string())?;
    Ok((img.width(), img.height()))
}
