use once_cell::sync::Lazy;
use regex::Regex;

// the embed page inlines both of these as script constants. nobody versions that page so if
// extraction starts failing, this is the only place that should need to change
static SOURCE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"const vpro = "(https://.*?)";"#).expect("Static regex should compile")
});

static IMDB_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"const imdbId = "(tt.*?)";"#).expect("Static regex should compile")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedTokens {
    /// playable url, the whole point of the page
    pub source_url: Option<String>,
    /// only used to look up subtitles
    pub imdb_id: Option<String>,
}

/// first match of each token, they're looked up independently so one missing doesn't hide the
/// other
pub fn extract_embed_tokens(body: &str) -> EmbedTokens {
    EmbedTokens {
        source_url: first_capture(&SOURCE_URL_REGEX, body),
        imdb_id: first_capture(&IMDB_ID_REGEX, body),
    }
}

fn first_capture(regex: &Regex, body: &str) -> Option<String> {
    regex
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
