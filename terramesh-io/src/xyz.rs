//! Whitespace-delimited XYZ text format
//!
//! Scan exports arrive as plain text, one point per line, three numeric
//! fields (X Y Z) separated by arbitrary whitespace. Sensor dropouts are
//! marked with a literal `NaN` token. Loading cleans the file: blank lines
//! and lines carrying a `NaN` token are discarded, everything that remains
//! must parse as a full numeric row or the load fails with line context.
//!
//! The cleaned cloud can be persisted next to the input as
//! `<input minus 4-char extension>_cleaned.txt`, tab-delimited with six
//! decimal places per value.

use crate::{PointCloudReader, PointCloudWriter};
use terramesh_core::{Error, Point3d, PointCloud3d, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sentinel marking an invalid measurement. Matched per token, exact case.
const NAN_TOKEN: &str = "NaN";

/// Reader for whitespace-delimited XYZ text files with cleaning
pub struct XyzReader;

/// Writer producing the fixed tab-delimited, 6-decimal cleaned format
pub struct XyzWriter;

impl XyzReader {
    /// Read a point cloud from a text file, discarding invalid lines.
    ///
    /// Blank lines and lines containing a `NaN` token are skipped. Every
    /// kept line must have exactly three numeric fields; a non-numeric
    /// token or a deviating field count is a fatal parse error naming the
    /// 1-based line number.
    pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud3d> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut cloud = PointCloud3d::new();

        for (number, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_number = number + 1;

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() || tokens.iter().any(|&t| t == NAN_TOKEN) {
                continue;
            }

            if tokens.len() != 3 {
                return Err(Error::parse(
                    line_number,
                    line.clone(),
                    format!("expected 3 fields (X Y Z), found {}", tokens.len()),
                ));
            }

            let mut values = [0.0f64; 3];
            for (value, token) in values.iter_mut().zip(&tokens) {
                *value = token.parse().map_err(|_| {
                    Error::parse(
                        line_number,
                        line.clone(),
                        format!("invalid numeric field {:?}", token),
                    )
                })?;
            }

            cloud.push(Point3d::new(values[0], values[1], values[2]));
        }

        Ok(cloud)
    }
}

impl XyzWriter {
    /// Write a point cloud as tab-delimited text, six decimal places per value.
    pub fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud3d, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for point in cloud.iter() {
            writeln!(writer, "{:.6}\t{:.6}\t{:.6}", point.x, point.y, point.z)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl PointCloudReader for XyzReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud3d> {
        XyzReader::read_point_cloud(path)
    }
}

impl PointCloudWriter for XyzWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud3d, path: P) -> Result<()> {
        XyzWriter::write_point_cloud(cloud, path)
    }
}

/// Derive the cleaned-copy path from the input path.
///
/// The input's last four characters are assumed to be a `.txt`-like
/// extension and are replaced with `_cleaned.txt`. A file name too short
/// to carry a stem before that extension is rejected rather than silently
/// truncated.
pub fn cleaned_output_path(input: &Path) -> Result<PathBuf> {
    let input_str = input.to_str().ok_or_else(|| {
        Error::Usage(format!("input path is not valid UTF-8: {}", input.display()))
    })?;

    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if name.chars().count() <= 4 {
        return Err(Error::Usage(format!(
            "input file name {:?} is too short to strip a 4-character extension",
            name
        )));
    }

    // Byte offset of the fourth-from-last character; safe for non-ASCII paths.
    let cut = input_str
        .char_indices()
        .rev()
        .nth(3)
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok(PathBuf::from(format!("{}_cleaned.txt", &input_str[..cut])))
}

/// Persist the cleaned cloud next to the input file, returning the path
/// written. An existing file at the derived path is overwritten.
pub fn write_cleaned_cloud(input: &Path, cloud: &PointCloud3d) -> Result<PathBuf> {
    let output = cleaned_output_path(input)?;
    XyzWriter::write_point_cloud(cloud, &output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    #[test]
    fn test_reader_skips_blank_and_nan_lines() {
        let path = temp_path("terramesh_skip_test.txt");
        fs::write(&path, "1.0 2.0 3.0\n\n4.0 5.0 NaN\n7.0 8.0 9.0\n").unwrap();

        let cloud = XyzReader::read_point_cloud(&path).unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud[0], Point3d::new(1.0, 2.0, 3.0));
        assert_eq!(cloud[1], Point3d::new(7.0, 8.0, 9.0));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reader_nan_match_is_per_token_and_case_sensitive() {
        let path = temp_path("terramesh_nan_token_test.txt");
        // "NaN" anywhere in the line drops it only when it is a whole token;
        // lowercase "nan" is a valid float literal and parses through.
        fs::write(&path, "NaN 2.0 3.0\n1.0 nan 3.0\n4.0 5.0 6.0\n").unwrap();

        let cloud = XyzReader::read_point_cloud(&path).unwrap();
        assert_eq!(cloud.len(), 2);
        assert!(cloud[0].y.is_nan());
        assert_eq!(cloud[1], Point3d::new(4.0, 5.0, 6.0));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reader_rejects_non_numeric_token_with_line_number() {
        let path = temp_path("terramesh_bad_token_test.txt");
        fs::write(&path, "1.0 2.0 3.0\n4.0 oops 6.0\n").unwrap();

        let err = XyzReader::read_point_cloud(&path).unwrap_err();
        match err {
            Error::Parse { line, ref content, .. } => {
                assert_eq!(line, 2);
                assert!(content.contains("oops"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reader_rejects_ragged_rows() {
        let path = temp_path("terramesh_ragged_test.txt");
        fs::write(&path, "1.0 2.0 3.0\n4.0 5.0\n").unwrap();

        let err = XyzReader::read_point_cloud(&path).unwrap_err();
        match err {
            Error::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_reader_missing_file_is_io_error() {
        let err = XyzReader::read_point_cloud("no_such_file_anywhere.txt").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_cleaned_output_path_replaces_extension() {
        let derived = cleaned_output_path(Path::new("data.txt")).unwrap();
        assert_eq!(derived, PathBuf::from("data_cleaned.txt"));

        let derived = cleaned_output_path(Path::new("/scans/site_04.xyz")).unwrap();
        assert_eq!(derived, PathBuf::from("/scans/site_04_cleaned.txt"));
    }

    #[test]
    fn test_cleaned_output_path_rejects_short_names() {
        assert!(cleaned_output_path(Path::new(".txt")).is_err());
        assert!(cleaned_output_path(Path::new("a.tx")).is_err());
        assert!(cleaned_output_path(Path::new("/some/dir/.txt")).is_err());
    }

    #[test]
    fn test_writer_fixed_precision_format() {
        let path = temp_path("terramesh_precision_test.txt");
        let cloud = PointCloud3d::from_points(vec![Point3d::new(1.0, -2.5, 0.1234567)]);

        XyzWriter::write_point_cloud(&cloud, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1.000000\t-2.500000\t0.123457\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_cleaned_roundtrip_within_precision() {
        let input = temp_path("terramesh_roundtrip.txt");
        fs::write(&input, "0.5 1.25 -3.75\n10.0 20.0 30.0\n").unwrap();

        let cloud = XyzReader::read_point_cloud(&input).unwrap();
        let written = write_cleaned_cloud(&input, &cloud).unwrap();
        assert!(written.to_str().unwrap().ends_with("terramesh_roundtrip_cleaned.txt"));

        let reread = XyzReader::read_point_cloud(&written).unwrap();
        assert_eq!(cloud.len(), reread.len());
        for (a, b) in cloud.iter().zip(reread.iter()) {
            assert!((a.x - b.x).abs() < 1e-6);
            assert!((a.y - b.y).abs() < 1e-6);
            assert!((a.z - b.z).abs() < 1e-6);
        }

        // Writing twice must produce byte-identical output.
        let first = fs::read(&written).unwrap();
        write_cleaned_cloud(&input, &cloud).unwrap();
        let second = fs::read(&written).unwrap();
        assert_eq!(first, second);

        let _ = fs::remove_file(&input);
        let _ = fs::remove_file(&written);
    }
}
