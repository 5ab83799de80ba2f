//! Writing the canvas out as an image file.

use crate::config::{ExportConfig, ExportFormat};
use crate::draw::Canvas;
use crate::util::expand_tilde;
use chrono::Local;
use chrono::format::{Item, StrftimeItems};
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not read canvas pixels: {0}")]
    Pixels(#[from] cairo::BorrowError),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
    #[error("invalid filename template '{0}'")]
    Template(String),
}

/// Resolved export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory to write images to.
    pub directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    pub format: ExportFormat,
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

impl ExportOptions {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            directory: expand_tilde(&config.directory),
            filename_template: config.filename_template.clone(),
            format: config.format,
            jpeg_quality: config.jpeg_quality.clamp(1, 100),
        }
    }
}

/// Generate a filename based on the template and current time.
pub fn generate_filename(template: &str, extension: &str) -> Result<String, ExportError> {
    let mut stem = String::new();
    write!(stem, "{}", Local::now().format(template))
        .map_err(|_| ExportError::Template(template.to_string()))?;
    Ok(format!("{stem}.{extension}"))
}

/// Returns false when the template holds a specifier chrono cannot render.
pub fn is_valid_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    Ok(directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf()))
}

/// Encodes the canvas pixels in `format`.
pub fn encode(canvas: &Canvas, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Jpeg => {
            let rgb = canvas.to_rgb8()?;
            let mut encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100));
            encoder.encode(
                &rgb,
                canvas.width() as u32,
                canvas.height() as u32,
                ExtendedColorType::Rgb8,
            )?;
        }
        ExportFormat::Png => canvas.write_png(&mut bytes)?,
    }
    Ok(bytes)
}

/// Encodes the canvas and writes it into the export directory.
///
/// Returns the path of the written file. An existing file with the same name is
/// replaced, matching a browser download of a fixed filename.
pub fn export_canvas(canvas: &Canvas, options: &ExportOptions) -> Result<PathBuf, ExportError> {
    let bytes = encode(canvas, options.format, options.jpeg_quality)?;
    let filename = generate_filename(&options.filename_template, options.format.extension())?;
    let path = ensure_directory_exists(&options.directory)?.join(filename);
    write_image(&path, &bytes)?;
    Ok(path)
}

/// Writes an already encoded image to an explicit path.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_directory_exists(parent)?;
    }

    log::info!("Saving image to: {} ({} bytes)", path.display(), bytes.len());
    fs::write(path, bytes)?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{PURPLE, StrokePoint, WHITE};

    fn options_in(dir: &Path, format: ExportFormat) -> ExportOptions {
        ExportOptions {
            directory: dir.join("out"),
            filename_template: "paint-example".to_string(),
            format,
            jpeg_quality: 100,
        }
    }

    #[test]
    fn default_name_matches_download_name() {
        assert_eq!(
            generate_filename("paint-example", "jpeg").unwrap(),
            "paint-example.jpeg"
        );
        let dated = generate_filename("paint_%Y", "png").unwrap();
        assert!(dated.starts_with("paint_2"));
        assert!(dated.ends_with(".png"));
    }

    #[test]
    fn bad_template_fails_export_instead_of_panicking() {
        assert!(!is_valid_template("paint-%Q"));
        assert!(is_valid_template("paint_%Y-%m-%d"));
        assert!(matches!(
            generate_filename("paint-%Q", "jpeg"),
            Err(ExportError::Template(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new(4, 4, WHITE).unwrap();
        let mut options = options_in(dir.path(), ExportFormat::Jpeg);
        options.filename_template = "paint-%Q".to_string();
        assert!(matches!(
            export_canvas(&canvas, &options),
            Err(ExportError::Template(_))
        ));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn default_options_use_jpeg_at_full_quality() {
        let options = ExportOptions::default();
        assert_eq!(options.format, ExportFormat::Jpeg);
        assert_eq!(options.jpeg_quality, 100);
        assert!(options.directory.to_string_lossy().contains("Paintboard"));
    }

    #[test]
    fn jpeg_export_writes_private_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut canvas = Canvas::new(32, 24, WHITE).unwrap();
        canvas
            .paint_segment(
                &StrokePoint::new(2.0, 2.0, 6.0, PURPLE, false),
                &StrokePoint::new(28.0, 20.0, 6.0, PURPLE, false),
                WHITE,
            )
            .unwrap();

        let path = export_canvas(&canvas, &options_in(dir.path(), ExportFormat::Jpeg)).unwrap();
        assert_eq!(path.file_name().unwrap(), "paint-example.jpeg");

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn png_export_has_png_signature() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new(8, 8, WHITE).unwrap();
        let path = export_canvas(&canvas, &options_in(dir.path(), ExportFormat::Png)).unwrap();
        assert_eq!(path.extension().unwrap(), "png");
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn export_overwrites_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let canvas = Canvas::new(4, 4, WHITE).unwrap();
        let options = options_in(dir.path(), ExportFormat::Jpeg);
        let first = export_canvas(&canvas, &options).unwrap();
        let second = export_canvas(&canvas, &options).unwrap();
        assert_eq!(first, second);
    }
}
