//! Local file acquisition.
//!
//! The editing core only ever sees `(file_name, text)` pairs; this module is
//! the collaborator that produces them for hosts reading sprites off disk.

use std::fs;
use std::path::Path;

use crate::app::ingest::SvgSource;

/// Read a set of paths into ingestable sources.
///
/// Names without a `.svg` extension are skipped outright, mirroring how file
/// pickers pre-filter their selection. Unreadable files are logged and
/// dropped so one bad path never sinks the batch.
pub fn read_svg_sources<P: AsRef<Path>>(paths: &[P]) -> Vec<SvgSource> {
    paths
        .iter()
        .filter_map(|path| read_svg_source(path.as_ref()))
        .collect()
}

fn read_svg_source(path: &Path) -> Option<SvgSource> {
    let file_name = path.file_name()?.to_str()?.to_owned();
    if !file_name.ends_with(".svg") {
        return None;
    }
    match fs::read_to_string(path) {
        Ok(text) => Some(SvgSource { file_name, text }),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read svg source");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn reads_svg_files_and_skips_everything_else() {
        let temp = tempfile::tempdir().unwrap();
        let svg = temp.path().join("dot.svg");
        let txt = temp.path().join("notes.txt");
        fs::write(&svg, "<svg viewBox=\"0 0 1 1\"><circle/></svg>").unwrap();
        fs::write(&txt, "not markup").unwrap();

        let sources = read_svg_sources(&[svg, txt]);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].file_name, "dot.svg");
        assert!(sources[0].text.contains("<circle/>"));
    }

    #[test]
    fn missing_files_are_dropped_not_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let gone = temp.path().join("gone.svg");
        let sources = read_svg_sources(&[gone]);
        assert!(sources.is_empty());
    }
}
