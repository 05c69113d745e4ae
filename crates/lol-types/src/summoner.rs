use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left as-is in the game-name part of a Riot ID.
const RIOT_ID_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// A player account. `riot_id` is derived once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summoner {
    summoner_name: String,
    tagline: String,
    puuid: String,
    riot_id: String,
}

impl Summoner {
    pub fn new(
        summoner_name: impl Into<String>,
        tagline: impl Into<String>,
        puuid: impl Into<String>,
    ) -> Self {
        let summoner_name = summoner_name.into();
        let tagline = tagline.into();
        let riot_id = format!(
            "{}#{}",
            utf8_percent_encode(&summoner_name, RIOT_ID_ENCODE),
            tagline
        );
        Self {
            summoner_name,
            tagline,
            puuid: puuid.into(),
            riot_id,
        }
    }

    pub fn summoner_name(&self) -> &str {
        &self.summoner_name
    }

    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    pub fn puuid(&self) -> &str {
        &self.puuid
    }

    /// `urlencode(name)#tagline`, ready to drop into a query string
    pub fn riot_id(&self) -> &str {
        &self.riot_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_riot_id_is_percent_encoded() {
        let s = Summoner::new("Test Player!", "KR", "");
        assert_eq!(s.riot_id(), "Test%20Player%21#KR");
        assert_eq!(s.summoner_name(), "Test Player!");
        assert_eq!(s.tagline(), "KR");
    }

    #[test]
    fn test_riot_id_unicode_and_safe_chars() {
        let s = Summoner::new("Hide on bush", "KR1", "abc-123");
        assert_eq!(s.riot_id(), "Hide%20on%20bush#KR1");
        assert_eq!(s.puuid(), "abc-123");

        let s = Summoner::new("a-b.c_d~e/f", "EUW", "");
        assert_eq!(s.riot_id(), "a-b.c_d~e/f#EUW");

        let s = Summoner::new("페이커", "T1", "");
        assert_eq!(s.riot_id(), "%ED%8E%98%EC%9D%B4%EC%BB%A4#T1");
    }
}
