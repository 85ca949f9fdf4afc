use super::DeviceTypeId;

/// Classification of a raw, caller-supplied identifier
///
/// The primary-key format check wins over numeric parsing, so a 24-digit
/// numeric string is a key, never an ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRef {
    PrimaryKey(DeviceTypeId),
    OrdinalIndex(i64),
    Invalid,
}

impl ResourceRef {
    pub fn classify(raw: &str) -> Self {
        if let Ok(id) = DeviceTypeId::new(raw) {
            return Self::PrimaryKey(id);
        }

        match leading_integer(raw) {
            Some(n) if n >= 1 => Self::OrdinalIndex(n),
            _ => Self::Invalid,
        }
    }
}

/// Base-10 prefix parse: leading whitespace, an optional sign, then the
/// longest run of digits. Trailing text is ignored, so `"12abc"` is 12.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (false, &trimmed[1..]),
        Some(b'-') => (true, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let n = rest[..digits].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}
