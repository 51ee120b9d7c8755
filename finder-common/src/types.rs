use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hemisphere '{0}', expected 'north' or 'south'")]
pub struct ParseHemisphereError(pub String);

/// Which of the two seasonal calendars applies to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    #[serde(rename = "north")]
    North,
    #[serde(rename = "south")]
    South,
}

impl Hemisphere {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Hemisphere {
    type Err = ParseHemisphereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(Hemisphere::North),
            "south" => Ok(Hemisphere::South),
            _ => Err(ParseHemisphereError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hemisphere() {
        assert_eq!("north".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert_eq!("South".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        assert_eq!(" NORTH ".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert_eq!(
            "east".parse::<Hemisphere>().unwrap_err(),
            ParseHemisphereError("east".to_string())
        );
        assert!("unset".parse::<Hemisphere>().is_err());
        assert!("".parse::<Hemisphere>().is_err());
    }

    #[test]
    fn test_hemisphere_wire_form() {
        assert_eq!(serde_json::to_string(&Hemisphere::South).unwrap(), "\"south\"");
        let h: Hemisphere = serde_json::from_str("\"north\"").unwrap();
        assert_eq!(h, Hemisphere::North);
        assert_eq!(Hemisphere::North.to_string(), "north");
    }
}
