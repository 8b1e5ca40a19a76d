use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(GameId);
id_newtype!(PlayerId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
}

impl CardColor {
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

/// Face value of a card. Travels as a string on the wire (`"0"`..`"9"`,
/// `"SKIP"`, `"REVERSE"`, `"DRAW_TWO"`, `"WILD"`, `"WILD_DRAW_FOUR"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardValue {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardValue {
    pub fn as_wire(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Skip => "SKIP".to_string(),
            Self::Reverse => "REVERSE".to_string(),
            Self::DrawTwo => "DRAW_TWO".to_string(),
            Self::Wild => "WILD".to_string(),
            Self::WildDrawFour => "WILD_DRAW_FOUR".to_string(),
        }
    }

    pub fn parse_wire(raw: &str) -> Option<Self> {
        match raw {
            "SKIP" => Some(Self::Skip),
            "REVERSE" => Some(Self::Reverse),
            "DRAW_TWO" => Some(Self::DrawTwo),
            "WILD" => Some(Self::Wild),
            "WILD_DRAW_FOUR" => Some(Self::WildDrawFour),
            digits => digits
                .parse::<u8>()
                .ok()
                .filter(|n| *n <= 9)
                .map(Self::Number),
        }
    }

    /// Short glyph used by the tray and hand widgets.
    pub fn glyph(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Skip => "⦸".to_string(),
            Self::Reverse => "⇄".to_string(),
            Self::DrawTwo => "+2".to_string(),
            Self::Wild => "★".to_string(),
            Self::WildDrawFour => "★+4".to_string(),
        }
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_wire())
    }
}

impl Serialize for CardValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_wire())
    }
}

impl<'de> Deserialize<'de> for CardValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_wire(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown card value '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_values_round_trip_through_wire_strings() {
        for value in [
            CardValue::Number(0),
            CardValue::Number(9),
            CardValue::Skip,
            CardValue::Reverse,
            CardValue::DrawTwo,
            CardValue::Wild,
            CardValue::WildDrawFour,
        ] {
            assert_eq!(CardValue::parse_wire(&value.as_wire()), Some(value));
        }
    }

    #[test]
    fn rejects_out_of_range_and_unknown_values() {
        assert_eq!(CardValue::parse_wire("10"), None);
        assert_eq!(CardValue::parse_wire("DRAW_SIX"), None);
        assert_eq!(CardValue::parse_wire(""), None);
    }

    #[test]
    fn card_color_uses_screaming_snake_case_on_the_wire() {
        let json = serde_json::to_string(&CardColor::Red).expect("serialize");
        assert_eq!(json, "\"RED\"");
        let back: CardColor = serde_json::from_str("\"YELLOW\"").expect("deserialize");
        assert_eq!(back, CardColor::Yellow);
    }
}
