use brp_common::serde::{self, Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct GelbooruTopLevel {
    #[serde(rename = "@attributes")]
    pub attributes: GelbooruAttributes,
    /// Missing entirely when the requested page has no posts.
    #[serde(default)]
    pub post: Vec<GelbooruPost>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct GelbooruAttributes {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(crate = "self::serde")]
pub struct GelbooruPost {
    pub id: Option<u64>,
    pub md5: Option<String>,
    pub file_url: Option<String>,
    pub tags: Option<String>,
    pub rating: Option<String>,
}
