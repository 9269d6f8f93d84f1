//! Testimonial video URL classification.
//!
//! Testimonials carry a free-form `video` URL. [`resolve`] turns it into a
//! [`VideoSource`] so the modal can choose between a YouTube or Vimeo iframe,
//! a native `<video>` element, or a placeholder when no video is configured.
//!
//! Resolution never fails. Anything that looks like YouTube or Vimeo but has
//! no extractable id is treated as a direct file.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    None,
    YouTube,
    Vimeo,
    DirectFile,
}

impl VideoKind {
    /// Short lowercase name used in markup and CLI output.
    pub fn label(self) -> &'static str {
        match self {
            VideoKind::None => "none",
            VideoKind::YouTube => "youtube",
            VideoKind::Vimeo => "vimeo",
            VideoKind::DirectFile => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSource {
    pub raw_url: Option<String>,
    pub kind: VideoKind,
    /// Provider id; always present for YouTube and Vimeo.
    pub embed_id: Option<String>,
}

/// How the presentation layer should play a [`VideoSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playback {
    Placeholder,
    Embed { src: String, allow: &'static str },
    Native { src: String },
}

const YOUTUBE_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";
const VIMEO_ALLOW: &str = "autoplay; fullscreen; picture-in-picture";

/// Classify a video URL.
pub fn resolve(url: Option<&str>) -> VideoSource {
    let raw = match url {
        Some(u) if !u.is_empty() => u,
        _ => {
            return VideoSource {
                raw_url: None,
                kind: VideoKind::None,
                embed_id: None,
            };
        }
    };

    let provider = if raw.contains("youtube.com") || raw.contains("youtu.be") {
        let id = youtube_id(raw);
        if id.is_none() {
            tracing::warn!(url = raw, "no YouTube id in url, playing it as a file");
        }
        id.map(|id| (VideoKind::YouTube, id))
    } else if raw.contains("vimeo.com") {
        let id = vimeo_id(raw);
        if id.is_none() {
            tracing::warn!(url = raw, "no Vimeo id in url, playing it as a file");
        }
        id.map(|id| (VideoKind::Vimeo, id))
    } else {
        None
    };

    match provider {
        Some((kind, id)) => VideoSource {
            raw_url: Some(raw.to_string()),
            kind,
            embed_id: Some(id.to_string()),
        },
        None => VideoSource {
            raw_url: Some(raw.to_string()),
            kind: VideoKind::DirectFile,
            embed_id: None,
        },
    }
}

/// Text between the first occurrence of `marker` and the next `stop`.
fn segment_after<'a>(url: &'a str, marker: &str, stop: char) -> Option<&'a str> {
    let (_, rest) = url.split_once(marker)?;
    let id = rest.split(stop).next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

fn youtube_id(url: &str) -> Option<&str> {
    if url.contains("youtube.com/watch?v=") {
        segment_after(url, "v=", '&')
    } else if url.contains("youtu.be/") {
        segment_after(url, "youtu.be/", '?')
    } else {
        None
    }
}

fn vimeo_id(url: &str) -> Option<&str> {
    segment_after(url, "vimeo.com/", '?')
}

impl VideoSource {
    /// Player URL for embeddable providers.
    pub fn embed_url(&self) -> Option<String> {
        let id = self.embed_id.as_deref()?;
        match self.kind {
            VideoKind::YouTube => Some(format!("https://www.youtube.com/embed/{id}")),
            VideoKind::Vimeo => Some(format!("https://player.vimeo.com/video/{id}")),
            VideoKind::None | VideoKind::DirectFile => None,
        }
    }

    pub fn playback(&self) -> Playback {
        match (self.kind, self.embed_url(), self.raw_url.as_deref()) {
            (VideoKind::YouTube, Some(src), _) => Playback::Embed {
                src,
                allow: YOUTUBE_ALLOW,
            },
            (VideoKind::Vimeo, Some(src), _) => Playback::Embed {
                src,
                allow: VIMEO_ALLOW,
            },
            (VideoKind::DirectFile, _, Some(src)) => Playback::Native {
                src: src.to_string(),
            },
            _ => Playback::Placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_url() {
        let v = resolve(None);
        assert_eq!(v.kind, VideoKind::None);
        assert_eq!(v.raw_url, None);
        assert_eq!(v.playback(), Playback::Placeholder);
    }

    #[test]
    fn empty_url() {
        assert_eq!(resolve(Some("")).kind, VideoKind::None);
    }

    #[test]
    fn youtube_watch_url() {
        let v = resolve(Some("https://www.youtube.com/watch?v=abc123&t=5s"));
        assert_eq!(v.kind, VideoKind::YouTube);
        assert_eq!(v.embed_id.as_deref(), Some("abc123"));
        assert_eq!(
            v.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/abc123")
        );
    }

    #[test]
    fn youtube_short_url() {
        let v = resolve(Some("https://youtu.be/xyz789"));
        assert_eq!(v.kind, VideoKind::YouTube);
        assert_eq!(v.embed_id.as_deref(), Some("xyz789"));
    }

    #[test]
    fn youtube_short_url_with_query() {
        let v = resolve(Some("https://youtu.be/xyz789?si=share"));
        assert_eq!(v.embed_id.as_deref(), Some("xyz789"));
    }

    #[test]
    fn youtube_without_id_is_direct_file() {
        let v = resolve(Some("https://www.youtube.com/channel/UC123"));
        assert_eq!(v.kind, VideoKind::DirectFile);
        assert_eq!(v.embed_id, None);

        let v = resolve(Some("https://www.youtube.com/watch?v=&t=5"));
        assert_eq!(v.kind, VideoKind::DirectFile);
    }

    #[test]
    fn vimeo_url() {
        let v = resolve(Some("https://vimeo.com/12345?x=1"));
        assert_eq!(v.kind, VideoKind::Vimeo);
        assert_eq!(v.embed_id.as_deref(), Some("12345"));
        match v.playback() {
            Playback::Embed { src, .. } => assert_eq!(src, "https://player.vimeo.com/video/12345"),
            other => panic!("expected embed, got {other:?}"),
        }
    }

    #[test]
    fn vimeo_without_id_is_direct_file() {
        let v = resolve(Some("https://vimeo.com/"));
        assert_eq!(v.kind, VideoKind::DirectFile);
    }

    #[test]
    fn direct_file() {
        let v = resolve(Some("https://cdn.example.com/clip.mp4"));
        assert_eq!(v.kind, VideoKind::DirectFile);
        assert_eq!(v.embed_id, None);
        assert_eq!(
            v.playback(),
            Playback::Native {
                src: "https://cdn.example.com/clip.mp4".to_string()
            }
        );
    }

    #[test]
    fn relative_path_is_direct_file() {
        let v = resolve(Some("/videos/story.mp4"));
        assert_eq!(v.kind, VideoKind::DirectFile);
        assert_eq!(v.raw_url.as_deref(), Some("/videos/story.mp4"));
    }
}
