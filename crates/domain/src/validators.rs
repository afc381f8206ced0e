use crate::DomainError;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Rejects names that cannot be sent as a DNS question.
///
/// Accepts an optional trailing root dot. Labels may contain ASCII letters,
/// digits, `-` and `_`, and must not start or end with `-`.
pub fn validate_domain_name(domain: &str) -> Result<(), DomainError> {
    let name = domain.strip_suffix('.').unwrap_or(domain);

    if name.is_empty() {
        return Err(DomainError::InvalidDomainName(
            "domain cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_DOMAIN_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' exceeds {} characters",
            domain, MAX_DOMAIN_LEN
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains an empty label",
                domain
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' has a label longer than {} characters",
                domain, MAX_LABEL_LEN
            )));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' has a label starting or ending with '-'",
                domain
            )));
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains invalid characters",
                domain
            )));
        }
    }

    Ok(())
}
