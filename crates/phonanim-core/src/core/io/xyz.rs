use crate::core::io::traits::PhononInput;
use crate::core::models::mode::THZ_TO_INV_CM;
use nalgebra::Point3;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Frame {frame} has {found} positions, expected {expected} (one per atom)")]
    FrameLength {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("No animation metadata comment lines found in the input file")]
    NoAnimationMetadata,
}

/// One animation frame: a comment line plus Cartesian positions in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct XyzFrame {
    pub comment: String,
    pub positions: Vec<Point3<f64>>,
}

/// Writes a sequence of frames in multi-frame XYZ format.
///
/// Each frame is an atom-count line, a comment line, and one
/// `  SYM  x  y  z` line per atom with fixed-width 16.10 coordinates. All
/// frames share the same atom list, so the symbols are passed once.
///
/// # Errors
///
/// Returns an error if any frame's position count differs from the symbol
/// count, or if writing fails.
pub fn write_frames(
    symbols: &[String],
    frames: &[XyzFrame],
    writer: &mut impl Write,
) -> Result<(), XyzError> {
    for (index, frame) in frames.iter().enumerate() {
        if frame.positions.len() != symbols.len() {
            return Err(XyzError::FrameLength {
                frame: index + 1,
                expected: symbols.len(),
                found: frame.positions.len(),
            });
        }
    }

    for frame in frames {
        writeln!(writer, "{}", symbols.len())?;
        writeln!(writer, "{}", frame.comment)?;
        for (symbol, position) in symbols.iter().zip(&frame.positions) {
            writeln!(
                writer,
                "  {:>3}  {:16.10}  {:16.10}  {:16.10}",
                symbol, position.x, position.y, position.z
            )?;
        }
    }

    Ok(())
}

/// Writes a sequence of frames in multi-frame XYZ format to a file path.
pub fn write_frames_to_path<P: AsRef<Path>>(
    symbols: &[String],
    frames: &[XyzFrame],
    path: P,
) -> Result<(), XyzError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_frames(symbols, frames, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Formats the comment line used in per-mode animation files.
pub fn frame_comment(frequency_thz: f64, amplitude: f64) -> String {
    format!(
        "v = {:8.3} THz ({:8.2} cm^-1), q = {:8.3} amu^1/2 A",
        frequency_thz,
        frequency_thz * THZ_TO_INV_CM,
        amplitude
    )
}

/// Formats the comment line used in the merged animation file.
///
/// The merged file interleaves frames from many modes, so each comment also
/// records the 1-based mode number. [`AnimationIndex`] parses these lines back
/// when assembling GIFs, so the grammar here and the regex below must agree.
pub fn mode_comment(mode_number: usize, frequency_thz: f64, amplitude: f64) -> String {
    format!(
        "mode = {:4}, v = {:8.3} THz ({:8.2} cm^-1), q = {:8.3} amu^1/2 A",
        mode_number,
        frequency_thz,
        frequency_thz * THZ_TO_INV_CM,
        amplitude
    )
}

static MODE_COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"mode =\s+(?P<mode>\d+), v =\s+(?P<thz>-?\d+\.\d+) THz \(\s*(?P<invcm>-?\d+\.\d+) cm\^-1\), q =\s+(?P<q>-?\d+\.\d+) amu\^1/2 A",
    )
    .expect("mode comment regex must compile")
});

/// Per-mode animation metadata recovered from a merged animation file.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeFrames {
    /// The 1-based mode number.
    pub mode_number: usize,
    pub frequency_thz: f64,
    pub frequency_inv_cm: f64,
    /// Normal-mode amplitudes, one per animation frame, in frame order.
    pub amplitudes: Vec<f64>,
}

/// An index of the animation frames contained in a merged animation file.
///
/// Built by scanning the comment lines written by [`mode_comment`]; atom
/// coordinates are not parsed. The GIF-assembly step uses the index to pair
/// externally rendered frame images with the modes they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationIndex {
    modes: Vec<ModeFrames>,
}

impl AnimationIndex {
    pub fn modes(&self) -> &[ModeFrames] {
        &self.modes
    }

    /// Returns the total number of animation frames across all modes.
    pub fn total_frames(&self) -> usize {
        self.modes.iter().map(|mode| mode.amplitudes.len()).sum()
    }
}

impl PhononInput for AnimationIndex {
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut by_mode: BTreeMap<usize, ModeFrames> = BTreeMap::new();

        for line in reader.lines() {
            let line = line?;
            let Some(captures) = MODE_COMMENT_REGEX.captures(&line) else {
                continue;
            };

            // The regex only admits digit sequences, so these parses cannot fail.
            let mode_number: usize = captures["mode"].parse().unwrap_or(0);
            let frequency_thz: f64 = captures["thz"].parse().unwrap_or(0.0);
            let frequency_inv_cm: f64 = captures["invcm"].parse().unwrap_or(0.0);
            let amplitude: f64 = captures["q"].parse().unwrap_or(0.0);

            by_mode
                .entry(mode_number)
                .or_insert_with(|| ModeFrames {
                    mode_number,
                    frequency_thz,
                    frequency_inv_cm,
                    amplitudes: Vec::new(),
                })
                .amplitudes
                .push(amplitude);
        }

        if by_mode.is_empty() {
            return Err(XyzError::NoAnimationMetadata);
        }

        Ok(AnimationIndex {
            modes: by_mode.into_values().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> Vec<String> {
        vec!["C".to_string(), "H".to_string()]
    }

    #[test]
    fn writer_produces_count_comment_and_coordinate_lines() {
        let frames = vec![XyzFrame {
            comment: "Expanded Structure".to_string(),
            positions: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, -2.5, 3.25)],
        }];

        let mut buffer = Vec::new();
        write_frames(&symbols(), &frames, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "Expanded Structure");
        assert_eq!(lines[2], "    C      0.0000000000      0.0000000000      0.0000000000");
        assert_eq!(lines[3], "    H      1.0000000000     -2.5000000000      3.2500000000");
    }

    #[test]
    fn writer_rejects_frame_with_wrong_atom_count() {
        let frames = vec![XyzFrame {
            comment: "bad".to_string(),
            positions: vec![Point3::new(0.0, 0.0, 0.0)],
        }];

        let mut buffer = Vec::new();
        let result = write_frames(&symbols(), &frames, &mut buffer);
        assert!(matches!(
            result,
            Err(XyzError::FrameLength {
                frame: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn animation_index_round_trips_mode_comments() {
        let mut text = String::new();
        for (mode, amplitude) in [(4, 0.0), (4, 0.25), (5, 0.0), (5, -0.25)] {
            text.push_str("2\n");
            text.push_str(&mode_comment(mode, 1.5, amplitude));
            text.push('\n');
            text.push_str("    C      0.0000000000      0.0000000000      0.0000000000\n");
            text.push_str("    H      1.0000000000      1.0000000000      1.0000000000\n");
        }

        let index = AnimationIndex::read_from(&mut text.as_bytes()).unwrap();
        assert_eq!(index.modes().len(), 2);
        assert_eq!(index.total_frames(), 4);

        let first = &index.modes()[0];
        assert_eq!(first.mode_number, 4);
        assert!((first.frequency_thz - 1.5).abs() < 1e-9);
        assert!((first.frequency_inv_cm - 1.5 * THZ_TO_INV_CM).abs() < 1e-1);
        assert_eq!(first.amplitudes.len(), 2);
        assert!((first.amplitudes[1] - 0.25).abs() < 1e-9);

        let second = &index.modes()[1];
        assert_eq!(second.mode_number, 5);
        assert!((second.amplitudes[1] + 0.25).abs() < 1e-9);
    }

    #[test]
    fn file_without_metadata_lines_is_an_error() {
        let text = "2\nExpanded Structure\n  C 0 0 0\n  H 1 1 1\n";
        let result = AnimationIndex::read_from(&mut text.as_bytes());
        assert!(matches!(result, Err(XyzError::NoAnimationMetadata)));
    }

    #[test]
    fn negative_frequencies_survive_the_round_trip() {
        let comment = mode_comment(1, -0.321, -0.125);
        let mut text = String::new();
        text.push_str(&comment);
        text.push('\n');

        let index = AnimationIndex::read_from(&mut text.as_bytes()).unwrap();
        let mode = &index.modes()[0];
        assert!((mode.frequency_thz + 0.321).abs() < 1e-9);
        assert!((mode.amplitudes[0] + 0.125).abs() < 1e-9);
    }
}
