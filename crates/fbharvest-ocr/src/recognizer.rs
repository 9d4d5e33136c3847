//! Text recognition over captured images.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::OcrError;

#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image: &Path) -> Result<String, OcrError>;
}

/// Runs the `tesseract` executable once per image, reading text from stdout.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: String,
    lang: String,
    /// Page segmentation mode; 6 treats the capture as one uniform block.
    psm: u8,
}

impl TesseractCli {
    pub fn new(program: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            lang: lang.into(),
            psm: 6,
        }
    }

    fn command(&self, image: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(image)
            .arg("stdout")
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("-l")
            .arg(&self.lang);
        cmd
    }
}

#[async_trait]
impl TextRecognizer for TesseractCli {
    async fn recognize(&self, image: &Path) -> Result<String, OcrError> {
        let output = self
            .command(image)
            .output()
            .await
            .map_err(|source| OcrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Recognizer {
                path: image.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!(image = %image.display(), %text, "tesseract output");
        Ok(text)
    }
}
