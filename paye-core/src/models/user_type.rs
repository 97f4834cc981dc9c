use serde::{Deserialize, Serialize};

/// Who is filing: an employee on payroll or a self-employed earner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Salaried,
    SelfEmployed,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salaried => "salaried",
            Self::SelfEmployed => "self_employed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salaried => "Salary Earner",
            Self::SelfEmployed => "Creator / Self-Employed",
        }
    }

    /// Parses a user type code. `salary` and `creator` are accepted as
    /// aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "salaried" | "salary" | "employee" => Some(Self::Salaried),
            "self_employed" | "selfemployed" | "creator" => Some(Self::SelfEmployed),
            _ => None,
        }
    }
}
