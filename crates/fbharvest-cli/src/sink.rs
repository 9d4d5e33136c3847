//! Filesystem-backed artifact sink used by `harvest`.

use fbharvest_core::ReactionTriple;
use fbharvest_scraper::{ArtifactSink, SinkError};
use fbharvest_store::{
    append_identity, append_triple, truncate, write_composite, write_png, OutputLayout,
};

pub(crate) struct FileSink {
    layout: OutputLayout,
}

impl FileSink {
    pub(crate) fn new(layout: OutputLayout) -> Self {
        Self { layout }
    }
}

impl ArtifactSink for FileSink {
    fn record_identity(&self, url: &str, identity_hash: &str) -> Result<(), SinkError> {
        append_identity(&self.layout.url_hash_csv(), url, identity_hash)?;
        Ok(())
    }

    fn save_account_screenshot(&self, file_name: &str, png: &[u8]) -> Result<(), SinkError> {
        write_png(&self.layout.root().join(file_name), png)?;
        Ok(())
    }

    fn append_dom_triple(
        &self,
        identity_hash: &str,
        triple: &ReactionTriple,
    ) -> Result<(), SinkError> {
        append_triple(&self.layout.dom_triples(identity_hash), triple)?;
        Ok(())
    }

    fn reset_dom_triples(&self, identity_hash: &str) -> Result<(), SinkError> {
        truncate(&self.layout.dom_triples(identity_hash))?;
        Ok(())
    }

    fn save_reaction_capture(&self, file_name: &str, png: &[u8]) -> Result<(), SinkError> {
        write_png(&self.layout.reaction_capture(file_name), png)?;
        Ok(())
    }

    fn save_composite(&self, file_name: &str, posts: &[Vec<u8>]) -> Result<(), SinkError> {
        write_composite(&self.layout.root().join(file_name), posts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn sink() -> (TempDir, FileSink) {
        let tmp = TempDir::new().expect("tempdir");
        let layout = OutputLayout::new(tmp.path());
        layout.ensure_dirs().expect("dirs");
        (tmp, FileSink::new(layout))
    }

    #[test]
    fn rows_land_in_their_files() {
        let (tmp, sink) = sink();
        sink.record_identity("https://www.facebook.com/a", "abc")
            .expect("identity");
        sink.append_dom_triple("abc", &ReactionTriple::new(4, 2, 1))
            .expect("triple");

        assert_eq!(
            fs::read_to_string(tmp.path().join("url-hash.csv")).expect("mapping"),
            "https://www.facebook.com/a,abc\n"
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("DOM/fbharvest_abc.csv")).expect("triples"),
            "4,2,1\n"
        );
    }

    #[test]
    fn reset_clears_earlier_rows_of_that_account_only() {
        let (tmp, sink) = sink();
        sink.append_dom_triple("abc", &ReactionTriple::new(4, 2, 1))
            .expect("triple");
        sink.append_dom_triple("def", &ReactionTriple::new(1, 0, 0))
            .expect("triple");

        sink.reset_dom_triples("abc").expect("reset");
        sink.append_dom_triple("abc", &ReactionTriple::new(9, 9, 9))
            .expect("triple");

        assert_eq!(
            fs::read_to_string(tmp.path().join("DOM/fbharvest_abc.csv")).expect("triples"),
            "9,9,9\n"
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("DOM/fbharvest_def.csv")).expect("triples"),
            "1,0,0\n"
        );
    }

    #[test]
    fn captures_go_under_ocr_dir() {
        let (tmp, sink) = sink();
        sink.save_reaction_capture("fbharvest_202104_abc_0001.png", b"png")
            .expect("capture");
        sink.save_account_screenshot("fbharvest_abc.png", b"page")
            .expect("screenshot");

        assert_eq!(
            fs::read(tmp.path().join("OCR/fbharvest_202104_abc_0001.png")).expect("capture"),
            b"png"
        );
        assert!(tmp.path().join("fbharvest_abc.png").exists());
    }

    #[test]
    fn undecodable_composite_input_is_an_error() {
        let (_tmp, sink) = sink();
        assert!(sink
            .save_composite("fbharvest_202104_abc.png", &[b"not png".to_vec()])
            .is_err());
    }
}
