//! PostgreSQL repository implementations, one module per aggregate.

mod book;
mod book_copy;
mod borrow;
mod user;

/// Mask an email for logging to avoid PII in logs: `alice@x.com` becomes
/// `a***@x.com`.
pub(crate) fn mask_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return "***".to_owned();
    };
    let mut chars = local.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) => format!("{first}***@{domain}"),
        _ => format!("***@{domain}"),
    }
}
