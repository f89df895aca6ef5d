/// Display title and subtitle parsed from an image file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleAndSubtitle {
    pub title: String,
    pub subtitle: String,
}

/// Splits `"Client - Project description.jpg"` into a title and a subtitle.
///
/// The trailing extension is dropped, then the name is split on the first
/// hyphen (optionally surrounded by whitespace). Without a hyphen the whole
/// name becomes the title. An empty name yields `"Untitled"`.
pub fn extract_title_and_subtitle(file_name: &str) -> TitleAndSubtitle {
    if file_name.is_empty() {
        return TitleAndSubtitle {
            title: "Untitled".to_string(),
            subtitle: String::new(),
        };
    }

    let stem = strip_extension(file_name);

    match stem.split_once('-') {
        Some((title, subtitle)) => TitleAndSubtitle {
            title: title.trim().to_string(),
            subtitle: subtitle.trim().to_string(),
        },
        None => TitleAndSubtitle {
            title: stem.trim().to_string(),
            subtitle: String::new(),
        },
    }
}

// Only a dot inside the last path segment with something after it counts.
fn strip_extension(name: &str) -> &str {
    let segment_start = name.rfind('/').map_or(0, |i| i + 1);
    match name[segment_start..].rfind('.') {
        Some(dot) if dot + 1 < name.len() - segment_start => &name[..segment_start + dot],
        _ => name,
    }
}
