use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use serde_json::Value;

use crate::{
    config::Settings,
    foundation::error::{PitchcardError, PitchcardResult},
    source::{LeagueMatch, LeagueSource, MatchSource, parse_league_matches, validate_match_id},
};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const REFERER_URL: &str = "https://www.fotmob.com/";

/// Blocking client for the FotMob `matchDetails` endpoint.
pub struct FotmobSource {
    client: Client,
    base_url: String,
}

impl FotmobSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PitchcardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PitchcardError::source(format!("failed to build http client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &Settings) -> PitchcardResult<Self> {
        Self::new(settings.source_base_url.clone(), settings.http_timeout)
    }

    pub fn match_url(&self, match_id: &str) -> PitchcardResult<String> {
        let id = validate_match_id(match_id)?;
        Ok(format!("{}/matchDetails?matchId={id}", self.base_url))
    }

    pub fn league_url(&self, league_id: u32) -> String {
        format!("{}/leagues?id={league_id}&tab=matches", self.base_url)
    }

    fn get_json(&self, url: &str) -> PitchcardResult<Value> {
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
            .header(REFERER, REFERER_URL)
            .send()
            .map_err(|e| PitchcardError::source(format!("request {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PitchcardError::source(format!("http {status} from {url}")));
        }
        let body = resp
            .json::<Value>()
            .map_err(|e| PitchcardError::source(format!("decode {url}: {e}")))?;
        tracing::debug!(%status, url, "fetched");
        Ok(body)
    }
}

impl MatchSource for FotmobSource {
    #[tracing::instrument(skip(self))]
    fn fetch(&self, match_id: &str) -> PitchcardResult<Value> {
        let url = self.match_url(match_id)?;
        self.get_json(&url)
    }
}

impl LeagueSource for FotmobSource {
    #[tracing::instrument(skip(self))]
    fn league_matches(&self, league_id: u32) -> PitchcardResult<Vec<LeagueMatch>> {
        let raw = self.get_json(&self.league_url(league_id))?;
        Ok(parse_league_matches(&raw))
    }
}
