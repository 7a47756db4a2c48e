use dmmtap_decode::Reading;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "json" => Self::Json,
            other => return Err(format!("unknown output format `{other}` (expected text or json)")),
        })
    }
}

impl OutputFormat {
    /// One line per reading, without the trailing newline.
    pub fn render(&self, reading: &Reading) -> serde_json::Result<String> {
        match self {
            Self::Text => Ok(reading.to_string()),
            Self::Json => serde_json::to_string(reading),
        }
    }
}
