use crate::config::HubSettings;

/// Decides admin rights from the stored flag and a configured email list.
///
/// The email list is a client-side check carried over from the web front
/// end; it is not a trust boundary.
#[derive(Debug, Clone, Default)]
pub struct AdminPolicy {
    emails: Vec<String>,
}

impl AdminPolicy {
    pub fn new(emails: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            emails: emails
                .into_iter()
                .map(|e| Into::<String>::into(e).trim().to_lowercase())
                .collect(),
        }
    }

    pub fn from_settings(settings: &HubSettings) -> Self {
        Self::new(settings.admin_emails.iter().cloned())
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.emails.iter().any(|e| *e == email)
    }

    pub fn is_admin(&self, flag: bool, email: Option<&str>) -> bool {
        flag || email.is_some_and(|e| self.is_admin_email(e))
    }
}
