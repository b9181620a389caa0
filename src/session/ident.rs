use crate::aws::CallerIdentity;
use crate::constants::{MAX_SESSION_NAME_LEN, SESSION_NAME_PREFIX};

/// Short label identifying the caller inside a role session name
///
/// An already-assumed-role caller is labeled by its access key ID (the
/// part of the user ID before the colon); anyone else by
/// `<account>_<last path segment of the ARN>`.
pub fn session_label(identity: &CallerIdentity) -> String {
    if identity.arn.contains(":assumed-role/") {
        identity
            .user_id
            .split(':')
            .next()
            .unwrap_or(&identity.user_id)
            .to_string()
    } else {
        let user = identity
            .arn
            .rsplit('/')
            .next()
            .unwrap_or(&identity.arn);
        format!("{}_{}", identity.account, user)
    }
}

/// Format a session name from an optional caller label
///
/// STS rejects session names longer than 64 characters, so an over-long
/// candidate (or a missing label) collapses to the prefix + timestamp form
pub fn session_name(label: Option<&str>, timestamp: i64) -> String {
    if let Some(label) = label {
        let candidate = format!("{SESSION_NAME_PREFIX}_{label}_{timestamp}");
        if candidate.len() <= MAX_SESSION_NAME_LEN {
            return candidate;
        }
    }
    format!("{SESSION_NAME_PREFIX}_{timestamp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_identity() -> CallerIdentity {
        CallerIdentity {
            account: "123456789012".to_string(),
            arn: "arn:aws:iam::123456789012:user/Alice".to_string(),
            user_id: "AKIAI44QH8DHBEXAMPLE".to_string(),
        }
    }

    fn assumed_role_identity() -> CallerIdentity {
        CallerIdentity {
            account: "123456789012".to_string(),
            arn: "arn:aws:sts::123456789012:assumed-role/AliceAdmins/AliceSession".to_string(),
            user_id: "AKIAI44QH8DHBEXAMPLE:AliceSession".to_string(),
        }
    }

    #[test]
    fn test_label_for_iam_user() {
        assert_eq!(session_label(&user_identity()), "123456789012_Alice");
    }

    #[test]
    fn test_label_for_assumed_role() {
        assert_eq!(
            session_label(&assumed_role_identity()),
            "AKIAI44QH8DHBEXAMPLE"
        );
    }

    #[test]
    fn test_label_uses_last_arn_path_segment() {
        let identity = CallerIdentity {
            account: "123456789012".to_string(),
            arn: "arn:aws:iam::123456789012:user/engineering/Alice".to_string(),
            user_id: "AKIAI44QH8DHBEXAMPLE".to_string(),
        };
        assert_eq!(session_label(&identity), "123456789012_Alice");
    }

    #[test]
    fn test_session_name_with_label() {
        assert_eq!(
            session_name(Some("123456789012_Alice"), 1499716571),
            "aws-runas-session_123456789012_Alice_1499716571"
        );
    }

    #[test]
    fn test_session_name_without_label() {
        assert_eq!(
            session_name(None, 1499716571),
            "aws-runas-session_1499716571"
        );
    }

    #[test]
    fn test_session_name_never_exceeds_limit() {
        let long_label = format!(
            "123456789012_{}",
            "Alice".repeat(14) // pushes the candidate well past 64 chars
        );
        let name = session_name(Some(&long_label), 1499716571);
        assert_eq!(name, "aws-runas-session_1499716571");
        assert!(name.len() <= MAX_SESSION_NAME_LEN);
    }

    #[test]
    fn test_session_name_at_exact_limit_is_kept() {
        let timestamp = 1499716571; // 10 digits
        // prefix(18) + "_" + label + "_" + 10 digits == 64
        let label = "x".repeat(64 - SESSION_NAME_PREFIX.len() - 2 - 10);
        let name = session_name(Some(&label), timestamp);
        assert_eq!(name.len(), MAX_SESSION_NAME_LEN);
        assert!(name.contains(&label));
    }
}
