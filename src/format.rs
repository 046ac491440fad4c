use chrono::{Datelike, NaiveDate};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::types::{InterestMethod, LoanStatus, PaymentFrequency, PaymentStatus};

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// amount with thousands separators and the configured suffix, e.g. `1,234,567.89 บาท`
pub fn format_currency(amount: Money, config: &LedgerConfig) -> String {
    format!("{} {}", group_thousands(amount), config.currency_suffix)
}

fn group_thousands(amount: Money) -> String {
    let plain = amount.abs().to_string();
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// `DD/MM/YYYY`, Buddhist-era year when configured
pub fn format_date(date: NaiveDate, config: &LedgerConfig) -> String {
    format!(
        "{:02}/{:02}/{}",
        date.day(),
        date.month(),
        config.display_year(date.year())
    )
}

/// day, Thai month name and year, e.g. `5 มกราคม 2568`
pub fn format_date_long(date: NaiveDate, config: &LedgerConfig) -> String {
    format!(
        "{} {} {}",
        date.day(),
        THAI_MONTHS[date.month0() as usize],
        config.display_year(date.year())
    )
}

pub fn frequency_label(frequency: PaymentFrequency) -> &'static str {
    match frequency {
        PaymentFrequency::Monthly => "รายเดือน",
        PaymentFrequency::Weekly => "รายสัปดาห์",
        PaymentFrequency::Daily => "รายวัน",
    }
}

pub fn method_label(method: InterestMethod) -> &'static str {
    match method {
        InterestMethod::Reducing => "ลดต้นลดดอก",
        InterestMethod::Flat => "คงที่",
    }
}

/// display label and colours for a status badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub label: String,
    pub color: &'static str,
    pub background: &'static str,
}

/// every status token the display layer knows how to style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusToken {
    Active,
    Completed,
    Overdue,
    Cancelled,
    Pending,
    Paid,
    Partial,
    /// unrecognized token, kept verbatim
    Unstyled(String),
}

impl StatusToken {
    pub fn from_token(token: &str) -> Self {
        match token {
            "active" => StatusToken::Active,
            "completed" => StatusToken::Completed,
            "overdue" => StatusToken::Overdue,
            "cancelled" => StatusToken::Cancelled,
            "pending" => StatusToken::Pending,
            "paid" => StatusToken::Paid,
            "partial" => StatusToken::Partial,
            other => StatusToken::Unstyled(other.to_string()),
        }
    }

    pub fn style(&self) -> StatusStyle {
        let (label, color, background) = match self {
            StatusToken::Active => ("แบ่งจ่าย", "#3b82f6", "#dbeafe"),
            StatusToken::Completed => ("เสร็จสิ้น", "#16a34a", "#dcfce7"),
            StatusToken::Overdue => ("ค้างชำระ", "#dc2626", "#fee2e2"),
            StatusToken::Cancelled => ("ยกเลิก", "#6b7280", "#f3f4f6"),
            StatusToken::Pending => ("รอชำระ", "#9333ea", "#f3e8ff"),
            StatusToken::Paid => ("จ่ายแล้ว", "#16a34a", "#dcfce7"),
            StatusToken::Partial => ("จ่ายบางส่วน", "#ea580c", "#ffedd5"),
            StatusToken::Unstyled(raw) => (raw.as_str(), "#6b7280", "#f3f4f6"),
        };

        StatusStyle {
            label: label.to_string(),
            color,
            background,
        }
    }
}

impl From<&PaymentStatus> for StatusToken {
    fn from(status: &PaymentStatus) -> Self {
        StatusToken::from_token(status.as_token())
    }
}

impl From<&LoanStatus> for StatusToken {
    fn from(status: &LoanStatus) -> Self {
        StatusToken::from_token(status.as_token())
    }
}

/// bytes left unescaped in a URI component: alphanumerics and -_.!~*'()
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// customer page link with the contract number as a query parameter
pub fn customer_view_url(contract_number: &str, config: &LedgerConfig) -> String {
    format!(
        "{}?contract={}",
        config.customer_view_base_url,
        utf8_percent_encode(contract_number, URI_COMPONENT)
    )
}
