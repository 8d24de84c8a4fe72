use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for the rename pass.
///
/// Outputs to stderr so it never interferes with the report on stdout; hidden
/// in quiet mode or when stderr is not a TTY.
pub struct ApplyProgress {
    progress_bar: ProgressBar,
}

impl ApplyProgress {
    /// Creates a progress bar over `total` planned renames.
    ///
    /// # Panics
    ///
    /// Panics if the progress bar template is invalid. The template is a
    /// compile-time constant, so this should never happen.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let progress_bar = if quiet || !is_tty || total == 0 {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} Renaming [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
                    )
                    .expect("progress bar template should be valid")
                    .progress_chars("#>-"),
            );
            pb
        };

        Self { progress_bar }
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}
