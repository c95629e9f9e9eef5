use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// One of the two players. `Light` is the side that moves first (White in
/// chess, Red in xiangqi) and is the maximizing player in search.
#[derive(Clone, Copy, PartialEq, Debug, Eq, PartialOrd, Ord)]
pub enum Side {
    Dark = 0,
    Light = 1,
}

impl Side {
    const ALL: [Side; 2] = [Side::Dark, Side::Light];

    pub fn opposite(&self) -> Self {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    pub fn maximize_score(&self) -> bool {
        match self {
            Side::Light => true,
            Side::Dark => false,
        }
    }

    pub fn random() -> Self {
        *Self::ALL.choose(&mut rand::thread_rng()).unwrap()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_str = match self {
            Side::Dark => "dark",
            Side::Light => "light",
        };
        write!(f, "{}", side_str)
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Side {
    type Err = ParseError;
    fn from_str(side: &str) -> Result<Self, Self::Err> {
        match side {
            "dark" => Ok(Side::Dark),
            "light" => Ok(Side::Light),
            "random" => Ok(Side::random()),
            _ => Err("invalid side; options are: light, dark, random"),
        }
    }
}
