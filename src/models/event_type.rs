use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub enum EventType {
    In,
    Out,
}

impl EventType {
    /// Parse user input ("in", "IN", "i", "out", "o", ...).
    pub fn et_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "in" | "i" => Some(Self::In),
            "out" | "o" => Some(Self::Out),
            _ => None,
        }
    }

    pub fn et_as_str(&self) -> &'static str {
        match self {
            EventType::In => "in",
            EventType::Out => "out",
        }
    }

    /// Convert enum → record field
    pub fn to_record_str(&self) -> &'static str {
        match self {
            EventType::In => "In",
            EventType::Out => "Out",
        }
    }

    /// Convert record field → enum (exact match only)
    pub fn from_record_str(s: &str) -> Option<Self> {
        match s {
            "In" => Some(EventType::In),
            "Out" => Some(EventType::Out),
            _ => None,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, EventType::In)
    }
}
