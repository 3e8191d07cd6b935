use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

pub const SOURCE_TAG: &str = "vidsrcVip";
pub const EMBED_TAG: &str = "hydrax";

/// both have to be there and both have to be positive, anything else (including 0) means "treat
/// it as a movie". the embed site itself behaves like this so it stays.
pub fn is_episode_specified(season: Option<i64>, episode: Option<i64>) -> bool {
    matches!((season, episode), (Some(s), Some(e)) if s > 0 && e > 0)
}

/// `?s=&e=` on the vidsrc route
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodeQuery {
    pub s: Option<i64>,
    pub e: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub content_id: String,
    pub season: Option<i64>,
    pub episode: Option<i64>,
}

impl StreamRequest {
    pub fn new(content_id: impl Into<String>, query: EpisodeQuery) -> Self {
        Self {
            content_id: content_id.into(),
            season: query.s,
            episode: query.e,
        }
    }

    /// season and episode, only when they're both usable
    pub fn episode(&self) -> Option<(i64, i64)> {
        match (self.season, self.episode) {
            (Some(s), Some(e)) if is_episode_specified(self.season, self.episode) => Some((s, e)),
            _ => None,
        }
    }
}

/// built from the imdb id scraped out of the embed page, never from the caller directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleQuery {
    pub imdb_id: String,
    /// already filtered through `StreamRequest::episode`
    pub episode: Option<(i64, i64)>,
}

impl SubtitleQuery {
    pub fn for_request(imdb_id: impl Into<String>, request: &StreamRequest) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            episode: request.episode(),
        }
    }

    /// `tt123.txt` for movies, `tt123-1-2.txt` for episodes
    pub fn file_name(&self) -> String {
        match self.episode {
            Some((season, episode)) => format!("{}-{}-{}.txt", self.imdb_id, season, episode),
            None => format!("{}.txt", self.imdb_id),
        }
    }
}

/// what the player gets back. captions is whatever the subs endpoint returned, untouched
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResult {
    pub source: String,
    pub embed_id: String,
    pub src: String,
    pub captions: Option<Box<RawValue>>,
}

impl StreamResult {
    pub fn hydrax(src: impl Into<String>, captions: Option<Box<RawValue>>) -> Self {
        Self {
            source: SOURCE_TAG.to_string(),
            embed_id: EMBED_TAG.to_string(),
            src: src.into(),
            captions,
        }
    }
}
