//! Non-volatile status conditions

/// Status conditions. At most one is held at a time; "none" is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Burn,
    Freeze,
    Paralyze,
    Poison,
    Sleep,
}

impl Status {
    /// Parse from the short or long form ("brn", "burn", "par", "paralyze", ...)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "brn" | "burn" => Some(Status::Burn),
            "frz" | "freeze" => Some(Status::Freeze),
            "par" | "paralyze" | "paralysis" => Some(Status::Paralyze),
            "psn" | "poison" => Some(Status::Poison),
            "slp" | "sleep" => Some(Status::Sleep),
            _ => None,
        }
    }

    /// Three-letter badge ("BRN", "PAR", ...)
    pub fn short(&self) -> &'static str {
        match self {
            Status::Burn => "BRN",
            Status::Freeze => "FRZ",
            Status::Paralyze => "PAR",
            Status::Poison => "PSN",
            Status::Sleep => "SLP",
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Burn => "Burn",
            Status::Freeze => "Freeze",
            Status::Paralyze => "Paralysis",
            Status::Poison => "Poison",
            Status::Sleep => "Sleep",
        }
    }

    /// Identifier used in narratives ("X is now PARALYZE!")
    pub fn id(&self) -> &'static str {
        match self {
            Status::Burn => "burn",
            Status::Freeze => "freeze",
            Status::Paralyze => "paralyze",
            Status::Poison => "poison",
            Status::Sleep => "sleep",
        }
    }

    /// Capture-chance multiplier for a creature holding this status
    pub fn catch_bonus(status: Option<Status>) -> f64 {
        match status {
            Some(Status::Sleep) | Some(Status::Freeze) => 1.25,
            Some(Status::Paralyze) | Some(Status::Burn) | Some(Status::Poison) => 1.12,
            None => 1.0,
        }
    }

    /// Whether this status deals damage at end of turn
    pub fn is_damaging(&self) -> bool {
        matches!(self, Status::Burn | Status::Poison)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
