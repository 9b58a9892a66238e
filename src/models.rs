/// The trimmed playback payload returned to callers. Mirrors the
/// subset of spotify's currently-playing response that we pass
/// through; everything else in their body is dropped on parse.
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    // null for non-track playback (podcasts, ads)
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub currently_playing_type: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Image {
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub url: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}
