use std::io;
use std::path::Path;

/// Extension used for saved captures, matched case-insensitively when
/// counting and always written lowercase.
pub const CAPTURE_EXT: &str = "jpg";

/// Count the valid captures already present in `dir`.
///
/// An entry counts when its extension matches [`CAPTURE_EXT`] and its header
/// parses as an image. Unreadable files are excluded rather than treated as
/// fatal: they are not valid prior captures.
pub fn count_existing(dir: &Path) -> io::Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(CAPTURE_EXT))
            .unwrap_or(false);
        if !matches_ext {
            continue;
        }

        if image::image_dimensions(&path).is_ok() {
            count += 1;
        } else {
            tracing::debug!("Ignoring unreadable capture {}", path.display());
        }
    }
    Ok(count)
}

/// Number to use for the next capture: `count_existing + 1`.
///
/// Count-based rather than max-suffix-based, so deleting earlier captures
/// lowers the result and can reuse a filename still present in the
/// directory. Kept as-is to match the established numbering behavior.
pub fn next_number(dir: &Path) -> io::Result<usize> {
    Ok(count_existing(dir)? + 1)
}

/// Build the 8-digit zero-padded filename for a sequence number,
/// e.g. `00000001.jpg`.
pub fn capture_filename(number: usize) -> String {
    format!("{:08}.{}", number, CAPTURE_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::fs;

    fn write_capture(dir: &Path, name: &str) {
        RgbImage::new(4, 4).save(dir.join(name)).unwrap();
    }

    #[test]
    fn empty_directory_counts_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(count_existing(dir.path()).unwrap(), 0);
        assert_eq!(next_number(dir.path()).unwrap(), 1);
    }

    #[test]
    fn counts_only_valid_captures() {
        let dir = tempfile::tempdir().unwrap();
        write_capture(dir.path(), "00000001.jpg");
        write_capture(dir.path(), "holiday.JPG");
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        fs::write(dir.path().join("corrupt.jpg"), b"not actually a jpeg").unwrap();
        fs::write(dir.path().join("frame.png"), b"wrong extension").unwrap();

        assert_eq!(count_existing(dir.path()).unwrap(), 2);
        assert_eq!(next_number(dir.path()).unwrap(), 3);
    }

    #[test]
    fn count_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_capture(dir.path(), "00000001.jpg");
        write_capture(dir.path(), "00000002.jpg");

        let first = count_existing(dir.path()).unwrap();
        let second = count_existing(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, 2);
    }

    #[test]
    fn deleting_a_capture_lowers_the_next_number() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["00000001.jpg", "00000002.jpg", "00000003.jpg"] {
            write_capture(dir.path(), name);
        }
        assert_eq!(next_number(dir.path()).unwrap(), 4);

        // Count-based, not max-based: removing the first file steps the
        // next number back even though 00000003.jpg still exists.
        fs::remove_file(dir.path().join("00000001.jpg")).unwrap();
        assert_eq!(next_number(dir.path()).unwrap(), 3);
    }

    #[test]
    fn filenames_are_zero_padded_to_eight_digits() {
        assert_eq!(capture_filename(1), "00000001.jpg");
        assert_eq!(capture_filename(42), "00000042.jpg");
        assert_eq!(capture_filename(12345678), "12345678.jpg");
    }
}
