use url::Url;

#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum CargoEnv {
    Development,
    Production,
}

impl CargoEnv {
    /// name reported to sentry and on /health
    pub fn as_str(&self) -> &'static str {
        match self {
            CargoEnv::Development => "development",
            CargoEnv::Production => "production",
        }
    }
}

#[derive(clap::Parser, Clone, Debug)]
pub struct AppConfig {
    // production or development
    #[clap(long, env, value_enum, default_value = "development")]
    pub cargo_env: CargoEnv,

    // address the app will bind to
    #[clap(long, env, default_value = "127.0.0.1")]
    pub host: String,

    // port that the app will bind to
    #[clap(long, env, default_value = "8000")]
    pub port: u16,

    // this should be either * for allowing everything, or a comma seperated list of domains like
    // https://example.com,https://something.com
    #[clap(long, env, default_value = "*")]
    pub cors_origin: String,

    // optional sentry integration
    #[clap(long, env)]
    pub sentry_dsn: Option<String>,

    // rolling log files land here in production
    #[clap(long, env, default_value = "logs")]
    pub log_dir: String,

    // embed site, both the hydrax pages and the subs live under this
    #[clap(long, env, default_value = "https://vidsrc.vip")]
    pub embed_base_url: Url,

    // sent as both Referer and Origin to the embed site
    #[clap(long, env, default_value = "https://vidsrc.vip")]
    pub embed_referer: String,

    // match listing api
    #[clap(long, env, default_value = "https://api.123goal.to")]
    pub match_api_base_url: Url,

    // the api checks these against its own frontend, not the api host
    #[clap(long, env, default_value = "https://123goal.to")]
    pub match_referer: String,

    // both upstreams want something that looks like a real browser
    #[clap(long, env, default_value = DEFAULT_USER_AGENT)]
    pub upstream_user_agent: String,

    // per outbound call, expiry is reported the same as a connection failure
    #[clap(long, env, default_value = "30")]
    pub upstream_timeout_secs: u64,

    #[clap(long, env, default_value = "true", action = clap::ArgAction::Set)]
    pub follow_redirects: bool,

    // when set a failed subtitle lookup gives `captions: null` instead of failing the request
    #[clap(long, env, default_value = "false", action = clap::ArgAction::Set)]
    pub optional_captions: bool,
}

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    // mirrors the clap defaults, mostly here so tests can build a config without the env
    fn default() -> Self {
        Self {
            cargo_env: CargoEnv::Development,
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origin: "*".to_string(),
            sentry_dsn: None,
            log_dir: "logs".to_string(),
            embed_base_url: Url::parse("https://vidsrc.vip").expect("Static url should parse"),
            embed_referer: "https://vidsrc.vip".to_string(),
            match_api_base_url: Url::parse("https://api.123goal.to")
                .expect("Static url should parse"),
            match_referer: "https://123goal.to".to_string(),
            upstream_user_agent: DEFAULT_USER_AGENT.to_string(),
            upstream_timeout_secs: 30,
            follow_redirects: true,
            optional_captions: false,
        }
    }
}
