//! Error message catalogue

use formlogic_common::ErrorKind;
use serde::{Deserialize, Serialize};

/// Language of validation messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "en-US")]
    En,
    #[serde(rename = "pt-BR", alias = "pt")]
    PtBr,
}

/// A failed check, with the constraint that failed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Issue {
    Required,
    InvalidFormat,
    TooShort { min: usize },
    TooLong { max: usize },
    NotANumber,
    BelowMinimum { min: f64 },
    AboveMaximum { max: f64 },
    InvalidDate,
    InvalidOption,
    FileTooLarge { max_mb: f64 },
}

impl Issue {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Required => ErrorKind::Required,
            Self::InvalidFormat => ErrorKind::InvalidFormat,
            Self::TooShort { .. } => ErrorKind::TooShort,
            Self::TooLong { .. } => ErrorKind::TooLong,
            Self::NotANumber => ErrorKind::NotANumber,
            Self::BelowMinimum { .. } => ErrorKind::BelowMinimum,
            Self::AboveMaximum { .. } => ErrorKind::AboveMaximum,
            Self::InvalidDate => ErrorKind::InvalidDate,
            Self::InvalidOption => ErrorKind::InvalidOption,
            Self::FileTooLarge { .. } => ErrorKind::FileTooLarge,
        }
    }
}

impl Locale {
    /// Word used when a field has no label
    pub fn unnamed_field(&self) -> &'static str {
        match self {
            Self::En => "Field",
            Self::PtBr => "Campo",
        }
    }

    /// Render `issue` for the field labelled `label`
    pub fn render(&self, label: &str, issue: &Issue) -> String {
        match self {
            Self::En => match issue {
                Issue::Required => format!("{label} is required"),
                Issue::InvalidFormat => format!("{label} has an invalid format"),
                Issue::TooShort { min } => format!("{label} must have at least {min} characters"),
                Issue::TooLong { max } => format!("{label} must have at most {max} characters"),
                Issue::NotANumber => format!("{label} must be a number"),
                Issue::BelowMinimum { min } => format!("{label} must be at least {min}"),
                Issue::AboveMaximum { max } => format!("{label} must be at most {max}"),
                Issue::InvalidDate => format!("{label} must be a valid date"),
                Issue::InvalidOption => format!("{label} has an invalid option"),
                Issue::FileTooLarge { max_mb } => format!("{label} must be smaller than {max_mb}MB"),
            },
            Self::PtBr => match issue {
                Issue::Required => format!("{label} é obrigatório"),
                Issue::InvalidFormat => format!("{label} tem formato inválido"),
                Issue::TooShort { min } => format!("{label} deve ter no mínimo {min} caracteres"),
                Issue::TooLong { max } => format!("{label} deve ter no máximo {max} caracteres"),
                Issue::NotANumber => format!("{label} deve ser um número"),
                Issue::BelowMinimum { min } => format!("{label} deve ser no mínimo {min}"),
                Issue::AboveMaximum { max } => format!("{label} deve ser no máximo {max}"),
                Issue::InvalidDate => format!("{label} deve ser uma data válida"),
                Issue::InvalidOption => format!("{label} tem uma opção inválida"),
                Issue::FileTooLarge { max_mb } => format!("{label} deve ser menor que {max_mb}MB"),
            },
        }
    }
}
