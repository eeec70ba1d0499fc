use serde::{Deserialize, Serialize};
use std::path::Path;

/// One user-selected source clip. Identity is the absolute path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFile {
    pub absolute_path: String,
    pub name: String,
}

impl VideoFile {
    /// Capture a chosen path as a clip. The display name is the file name
    /// component, falling back to the whole path for degenerate inputs.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            absolute_path: path.to_string_lossy().to_string(),
            name,
        }
    }
}

/// Extensions the file chooser offers; anything else is ignored on upload.
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mkv", "avi", "mov"];

pub fn is_video_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            VIDEO_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// A labeled time range. `src_file` is `None` inside a clip's own summary
/// (the clip is implicit) and `Some` when the segment references a specific
/// source clip as part of a storyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub start_time_sec: f64,
    pub end_time_sec: f64,
    pub description: String,
    pub src_file: Option<VideoFile>,
}

impl Segment {
    /// `0 <= start < end`
    pub fn has_valid_range(&self) -> bool {
        self.start_time_sec >= 0.0 && self.start_time_sec < self.end_time_sec
    }
}

/// The summarization stage's output for one uploaded clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub file: VideoFile,
    pub summary: String,
    pub aesthetic_rating: Option<f64>,
    pub segments: Vec<Segment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_video_file_from_path() {
        let file = VideoFile::from_path(&PathBuf::from("/clips/holiday.mp4"));
        assert_eq!(file.absolute_path, "/clips/holiday.mp4");
        assert_eq!(file.name, "holiday.mp4");
    }

    #[test]
    fn test_is_video_path_filters_extensions() {
        assert!(is_video_path(Path::new("/a/b.mp4")));
        assert!(is_video_path(Path::new("/a/b.MOV")));
        assert!(!is_video_path(Path::new("/a/b.txt")));
        assert!(!is_video_path(Path::new("/a/noext")));
    }

    #[test]
    fn test_segment_range_invariant() {
        let mut seg = Segment {
            start_time_sec: 0.0,
            end_time_sec: 20.0,
            description: "intro".to_string(),
            src_file: None,
        };
        assert!(seg.has_valid_range());

        seg.start_time_sec = 20.0;
        assert!(!seg.has_valid_range());

        seg.start_time_sec = -1.0;
        assert!(!seg.has_valid_range());
    }

    #[test]
    fn test_segment_wire_field_names() {
        let seg = Segment {
            start_time_sec: 5.0,
            end_time_sec: 8.0,
            description: "outro".to_string(),
            src_file: Some(VideoFile {
                absolute_path: "/clips/a.mp4".to_string(),
                name: "a.mp4".to_string(),
            }),
        };
        let json = serde_json::to_value(&seg).unwrap();
        assert!(json.get("startTimeSec").is_some());
        assert!(json.get("endTimeSec").is_some());
        assert_eq!(json["srcFile"]["absolutePath"], "/clips/a.mp4");
    }
}
