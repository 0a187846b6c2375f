//! Builtin text patterns and ad-hoc regex checks

use formlogic_common::TextFormat;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10,15}$").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(https?://)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)$",
    )
    .unwrap()
});
static ZIPCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").unwrap());
static CPF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap());
static CNPJ: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}$").unwrap());
static IP_ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").unwrap());
static CREDIT_CARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{13,19}$").unwrap());

/// Compiled pattern for a builtin format
pub fn format_regex(format: TextFormat) -> &'static Regex {
    match format {
        TextFormat::Email => &EMAIL,
        TextFormat::Phone => &PHONE,
        TextFormat::Url => &URL,
        TextFormat::Zipcode => &ZIPCODE,
        TextFormat::Cpf => &CPF,
        TextFormat::Cnpj => &CNPJ,
        TextFormat::IpAddress => &IP_ADDRESS,
        TextFormat::CreditCard => &CREDIT_CARD,
    }
}

/// Whether `value` matches the builtin `format`
pub fn matches_format(value: &str, format: TextFormat) -> bool {
    format_regex(format).is_match(value)
}

/// Search `value` for `pattern`; an invalid pattern never matches
pub fn validate_with_regex(value: &str, pattern: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(value),
        Err(e) => {
            warn!(pattern, error = %e, "invalid regex pattern");
            false
        }
    }
}

pub fn validate_email(email: &str) -> bool {
    matches_format(email, TextFormat::Email)
}

pub fn validate_phone(phone: &str) -> bool {
    matches_format(phone, TextFormat::Phone)
}

pub fn validate_url(url: &str) -> bool {
    matches_format(url, TextFormat::Url)
}

pub fn validate_zipcode(zipcode: &str) -> bool {
    matches_format(zipcode, TextFormat::Zipcode)
}

pub fn validate_cpf(cpf: &str) -> bool {
    matches_format(cpf, TextFormat::Cpf)
}

pub fn validate_cnpj(cnpj: &str) -> bool {
    matches_format(cnpj, TextFormat::Cnpj)
}

pub fn validate_ip_address(ip: &str) -> bool {
    matches_format(ip, TextFormat::IpAddress)
}

pub fn validate_credit_card(number: &str) -> bool {
    matches_format(number, TextFormat::CreditCard)
}
