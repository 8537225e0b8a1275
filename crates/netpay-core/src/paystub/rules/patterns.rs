//! Label patterns used to locate pay stub fields.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any line carrying one of the two fields
    pub static ref FIELD_LABELS: Regex = Regex::new(
        r"(?i)(^net pay)|(Cheque Date:)"
    ).unwrap();

    // Net pay line: label at the start of the line
    pub static ref NET_PAY_LABEL: Regex = Regex::new(
        r"(?i)^net pay"
    ).unwrap();

    // Cheque date line: label anywhere, followed by a colon
    pub static ref CHEQUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)Cheque Date:"
    ).unwrap();

    // Keyword the amount payload is measured from
    pub static ref PAY_KEYWORD: Regex = Regex::new(
        r"(?i)pay"
    ).unwrap();

    // Label segment of a colon-split cheque date line
    pub static ref CHEQUE_DATE_SEGMENT: Regex = Regex::new(
        r"(?i)cheque date"
    ).unwrap();

    pub static ref DATE_SEPARATOR: Regex = Regex::new(
        r"[/-]"
    ).unwrap();
}
