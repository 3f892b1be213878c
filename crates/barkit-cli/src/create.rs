//! The `create` action.

use std::{
    io::Write,
    path::{self, Component, Path, PathBuf},
};

use log::{debug, info};

use barkit::{config::Style, writer};

use crate::{error::CliError, request::CreateRequest};

/// Writes the barcode described by `request` and reports the saved path.
///
/// # Errors
///
/// Returns [`CliError::Barkit`] when the code cannot be encoded, rendered or
/// written, and when the writer for the requested output is unavailable.
pub fn run(request: &CreateRequest, style: Style, out: &mut impl Write) -> Result<(), CliError> {
    let output = resolve_output(&request.output)?;
    debug!(output:? = output, kind = request.kind.to_string(); "Resolved output");

    let writer = writer::for_output(&request.kind, style)?;
    let path = barkit::generate(
        request.symbology,
        &request.code,
        writer.as_ref(),
        &output,
        &request.kind,
    )?;

    info!(path:? = path; "Barcode saved");
    writeln!(out, "New barcode saved as {}.", path.display())?;

    Ok(())
}

/// Makes `output` absolute and removes `.` and `..` components without
/// touching the filesystem.
fn resolve_output(output: &Path) -> Result<PathBuf, CliError> {
    let absolute = path::absolute(output)?;
    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use std::fs;

    use barkit::{OutputKind, RasterFormat, Symbology};
    use tempfile::TempDir;

    use super::*;

    fn request(dir: &TempDir, symbology: Symbology, code: &str, kind: OutputKind) -> CreateRequest {
        CreateRequest {
            symbology,
            code: code.to_string(),
            output: dir.path().join("label"),
            kind,
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c/out")),
            PathBuf::from("/a/c/out")
        );
        assert_eq!(normalize(Path::new("/../out")), PathBuf::from("/out"));
    }

    #[test]
    fn test_resolve_output_is_absolute() {
        let resolved = resolve_output(Path::new("sub/../out")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("out"));
        assert!(!resolved.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_create_svg() {
        let dir = TempDir::new().unwrap();
        let request = request(
            &dir,
            Symbology::Code39,
            "HELLO",
            OutputKind::Vector { compress: false },
        );
        let mut out = Vec::new();
        run(&request, Style::default(), &mut out).unwrap();

        let path = dir.path().join("label.svg");
        assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
        let stdout = String::from_utf8(out).unwrap();
        assert!(stdout.starts_with("New barcode saved as "));
        assert!(stdout.trim_end().ends_with("label.svg."));
    }

    #[cfg(feature = "raster")]
    #[test]
    fn test_create_png() {
        let dir = TempDir::new().unwrap();
        let request = request(
            &dir,
            Symbology::Ean13,
            "590123412345",
            OutputKind::Raster {
                format: RasterFormat::Png,
            },
        );
        run(&request, Style::default(), &mut Vec::new()).unwrap();
        let bytes = fs::read(dir.path().join("label.png")).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_invalid_code_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let request = request(
            &dir,
            Symbology::Ean13,
            "NOT DIGITS",
            OutputKind::Vector { compress: false },
        );
        let mut out = Vec::new();
        let err = run(&request, Style::default(), &mut out).unwrap_err();
        assert!(matches!(err, CliError::Barkit(barkit::BarkitError::Encode(_))));
        assert!(out.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
