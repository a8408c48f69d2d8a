//! Folder groups decks in the library
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Folder {
    #[serde(rename = "FolderId")]
    pub id: i64,
    #[serde(rename = "FolderName")]
    pub name: String,
    #[serde(rename = "FolderDescription", default)]
    pub description: String,
    #[serde(default)]
    pub creation_date: String,
}
