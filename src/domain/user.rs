use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: Company,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_company(mut self, name: impl Into<String>, catch_phrase: impl Into<String>) -> Self {
        self.company = Company {
            name: name.into(),
            catch_phrase: catch_phrase.into(),
        };
        self
    }

    /// "Author: {name} with {company}" as shown on a post card
    pub fn byline(&self) -> String {
        format!("Author: {} with {}", self.name, self.company.name)
    }
}
