//! Upload widget contract: the configuration handed to the widget and the
//! callback payload it reports back.

use serde::{Deserialize, Serialize};

use crate::error::AdminError;

pub const UPLOAD_FOLDER: &str = "sanjivani_studios";
pub const MAX_FILES: u32 = 20;
pub const MAX_IMAGE_BYTES: u64 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadWidgetConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub sources: Vec<String>,
    pub multiple: bool,
    pub max_files: u32,
    pub folder: String,
    pub client_allowed_formats: Vec<String>,
    pub max_image_file_size: u64,
}

impl UploadWidgetConfig {
    pub fn new(cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            cloud_name: cloud_name.to_string(),
            upload_preset: upload_preset.to_string(),
            sources: vec!["local".into(), "camera".into()],
            multiple: true,
            max_files: MAX_FILES,
            folder: UPLOAD_FOLDER.to_string(),
            client_allowed_formats: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_image_file_size: MAX_IMAGE_BYTES,
        }
    }

    /// Same checks the widget applies client side.
    pub fn check_file(&self, file_name: &str, size: u64) -> Result<(), AdminError> {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, e)| e.to_lowercase())
            .unwrap_or_default();
        if !self.client_allowed_formats.iter().any(|f| *f == ext) {
            return Err(AdminError::Validation(format!(
                "'{}' is not one of {}",
                file_name,
                self.client_allowed_formats.join(", ")
            )));
        }
        if size > self.max_image_file_size {
            return Err(AdminError::Validation(format!(
                "'{}' is larger than {} bytes",
                file_name, self.max_image_file_size
            )));
        }
        Ok(())
    }
}

/// What the CDN returns for one finished upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadInfo {
    pub secure_url: String,
    pub public_id: String,
    pub width: u32,
    pub height: u32,
}

/// One widget callback. Only `event == "success"` carries an [`UploadInfo`];
/// the widget also reports queue and progress events that are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadEvent {
    pub event: String,
    #[serde(default)]
    pub info: serde_json::Value,
}

impl UploadEvent {
    pub fn parse(json: &str) -> Result<Self, AdminError> {
        serde_json::from_str(json)
            .map_err(|e| AdminError::Validation(format!("upload callback: {}", e)))
    }

    pub fn is_success(&self) -> bool {
        self.event == "success"
    }

    pub fn success_info(&self) -> Result<Option<UploadInfo>, AdminError> {
        if !self.is_success() {
            return Ok(None);
        }
        serde_json::from_value(self.info.clone())
            .map(Some)
            .map_err(|e| AdminError::Validation(format!("upload result: {}", e)))
    }
}
