use crate::error::{CliError, Result};
use phonanim::core::io::xyz::AnimationIndex;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Assembles externally rendered frame images into per-mode animated GIFs by
/// invoking ImageMagick.
///
/// The frames are expected to be named `<frame_prefix>.<N><frame_ext>` with N
/// counting from zero across the whole merged animation, which is how VMD
/// numbers snapshots rendered from the merged XYZ file. The animation index
/// recovered from that file says how many frames belong to each mode.
pub struct GifAssembler {
    pub frame_dir: PathBuf,
    pub frame_prefix: String,
    pub frame_ext: String,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    /// Inter-frame delay in centiseconds, passed to `convert -delay`.
    pub delay_cs: u32,
    pub overwrite: bool,
    pub convert_bin: String,
}

impl GifAssembler {
    /// Scans the frame directory and returns the frame images in frame order.
    pub fn scan_frames(&self) -> Result<Vec<PathBuf>> {
        let mut numbered: Vec<(usize, PathBuf)> = Vec::new();

        for entry in std::fs::read_dir(&self.frame_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(number) = self.frame_number(name) {
                numbered.push((number, entry.path()));
            }
        }

        numbered.sort_by_key(|(number, _)| *number);
        debug!(
            frames = numbered.len(),
            dir = %self.frame_dir.display(),
            "scanned frame images"
        );
        Ok(numbered.into_iter().map(|(_, path)| path).collect())
    }

    fn frame_number(&self, name: &str) -> Option<usize> {
        let stem = name.strip_suffix(self.frame_ext.as_str())?;
        let digits = stem.strip_prefix(&format!("{}.", self.frame_prefix))?;
        digits.parse().ok()
    }

    /// Builds one GIF per mode in the index.
    ///
    /// Existing GIF files are skipped unless `overwrite` is set. Returns the
    /// paths of all GIFs belonging to the index, written or skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of frame images in the directory does
    /// not match the index, or if `convert` cannot be run or exits non-zero.
    pub fn assemble(&self, index: &AnimationIndex) -> Result<Vec<PathBuf>> {
        let frames = self.scan_frames()?;
        if frames.len() != index.total_frames() {
            return Err(CliError::Render(format!(
                "Found {} frame images in {}, but the merged animation has {} frames",
                frames.len(),
                self.frame_dir.display(),
                index.total_frames()
            )));
        }

        std::fs::create_dir_all(&self.output_dir)?;

        let mut outputs = Vec::with_capacity(index.modes().len());
        let mut offset = 0;

        for mode in index.modes() {
            let num_frames = mode.amplitudes.len();
            let mode_frames = &frames[offset..offset + num_frames];
            offset += num_frames;

            let gif_path = self
                .output_dir
                .join(format!("{}-Mode{:03}.gif", self.output_prefix, mode.mode_number));

            if gif_path.exists() && !self.overwrite {
                info!(
                    path = %gif_path.display(),
                    "GIF already exists, skipping (use --overwrite to rebuild)"
                );
                outputs.push(gif_path);
                continue;
            }

            self.run_convert(mode_frames, &gif_path)?;
            info!(
                mode = mode.mode_number,
                frequency_thz = mode.frequency_thz,
                path = %gif_path.display(),
                "GIF written"
            );
            outputs.push(gif_path);
        }

        Ok(outputs)
    }

    fn run_convert(&self, frames: &[PathBuf], gif_path: &Path) -> Result<()> {
        let status = Command::new(&self.convert_bin)
            .arg("-delay")
            .arg(self.delay_cs.to_string())
            .arg("-loop")
            .arg("0")
            .args(frames)
            .arg(gif_path)
            .status()
            .map_err(|e| {
                CliError::Render(format!(
                    "Failed to run '{}': {} (is ImageMagick installed?)",
                    self.convert_bin, e
                ))
            })?;

        if !status.success() {
            return Err(CliError::Render(format!(
                "'{}' exited with {} while writing {}",
                self.convert_bin,
                status,
                gif_path.display()
            )));
        }

        Ok(())
    }
}
