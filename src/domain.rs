/// Everything after the last `@`. An address without `@` is returned whole.
pub fn email_domain(email: &str) -> &str {
    match email.rfind('@') {
        Some(at) => &email[at + 1..],
        None => email,
    }
}

/// Masks every label left of the TLD. A short second-level label is replaced
/// by `???` so its length does not give it away.
pub fn redact_domain(domain: &str) -> String {
    let Some((labels, tld)) = domain.rsplit_once('.') else {
        return domain.to_string();
    };

    let second_level = labels.rsplit('.').next().unwrap_or(labels);
    if second_level.len() <= 3 {
        return format!("???.{tld}");
    }

    let masked: Vec<String> = labels.split('.').map(|label| "*".repeat(label.len())).collect();
    format!("{}.{}", masked.join("."), tld)
}
