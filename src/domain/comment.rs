use serde::{Deserialize, Serialize};

use super::PostId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: PostId,
    pub name: String,
    pub body: String,
    pub email: String,
}

impl Comment {
    pub fn new(
        id: u64,
        post_id: PostId,
        name: impl Into<String>,
        body: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            post_id,
            name: name.into(),
            body: body.into(),
            email: email.into(),
        }
    }

    pub fn from_line(&self) -> String {
        format!("From: {}", self.email)
    }
}
