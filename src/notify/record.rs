use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::constants::{DEFAULT_EXPIRE_AGE, DEFAULT_FROM_ADDR, DEFAULT_PROJECT};

/// One entry of the JSON array posted to `/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub user_id: i64,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_params: Option<Map<String, Value>>,
    pub project: String,
    pub sent_from: String,
    pub send_email: bool,
    pub important: bool,
    /// days the notification stays visible
    pub expire_age: u32,
}

/// A single notification with everything but the recipient defaulted.
///
/// Defaults: `from_addr` is `BookBrainz <noreply@bookbrainz.org>`, `project`
/// is `bookbrainz`, `send_email` and `important` are `true`, `expire_age` is 7.
/// Content fields are left out of the payload unless set.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub musicbrainz_row_id: i64,
    pub user_email: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub template_id: Option<String>,
    pub template_params: Option<Map<String, Value>>,
    pub from_addr: String,
    pub project: String,
    pub send_email: bool,
    pub important: bool,
    pub expire_age: u32,
}

impl Notification {
    pub fn new(musicbrainz_row_id: i64, user_email: impl Into<String>) -> Self {
        Self {
            musicbrainz_row_id,
            user_email: user_email.into(),
            subject: None,
            body: None,
            template_id: None,
            template_params: None,
            from_addr: DEFAULT_FROM_ADDR.to_owned(),
            project: DEFAULT_PROJECT.to_owned(),
            send_email: true,
            important: true,
            expire_age: DEFAULT_EXPIRE_AGE,
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn template_params(mut self, params: Map<String, Value>) -> Self {
        self.template_params = Some(params);
        self
    }

    pub fn from_addr(mut self, from_addr: impl Into<String>) -> Self {
        self.from_addr = from_addr.into();
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn send_email(mut self, send_email: bool) -> Self {
        self.send_email = send_email;
        self
    }

    pub fn important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn expire_age(mut self, days: u32) -> Self {
        self.expire_age = days;
        self
    }
}

impl From<Notification> for NotificationRecord {
    fn from(n: Notification) -> Self {
        Self {
            user_id: n.musicbrainz_row_id,
            to: n.user_email,
            subject: n.subject,
            body: n.body,
            template_id: n.template_id,
            template_params: n.template_params,
            project: n.project,
            sent_from: n.from_addr,
            send_email: n.send_email,
            important: n.important,
            expire_age: n.expire_age,
        }
    }
}
